// System prompt assembly

use crate::executor::{ToolDefinition, ToolKind};
use std::fmt::Write as _;

/// Example call for each tool, shown to the model verbatim
fn example(kind: ToolKind) -> (&'static str, Vec<(&'static str, &'static str)>) {
    match kind {
        ToolKind::ReadFile => ("To read a file", vec![("file_path", "src/main.rs")]),
        ToolKind::WriteFile => (
            "To write a file",
            vec![("file_path", "example.txt"), ("content", "Hello, world!")],
        ),
        ToolKind::DeleteFile => ("To delete a file", vec![("file_path", "temp.txt")]),
        ToolKind::CreateDirectory => ("To create a directory", vec![("dir_path", "new_folder")]),
        ToolKind::ExecuteBashCommand => {
            ("To execute a shell command", vec![("command", "cargo test")])
        }
        ToolKind::ScanCodebase => ("To get an overview of the project", vec![("root_path", ".")]),
        ToolKind::SearchCodebase => (
            "To search the project for some text",
            vec![("root_path", "."), ("query", "TODO"), ("max_results", "20")],
        ),
    }
}

fn write_call(out: &mut String, name: &str, params: &[(&str, &str)]) {
    let _ = writeln!(out, "<tool_call type=\"{}\">", name);
    for (param, value) in params {
        let _ = writeln!(out, "<parameter name=\"{}\">{}</parameter>", param, value);
    }
    out.push_str("</tool_call>\n");
}

/// Identity, available tools, call format, examples and rules
pub fn build_system_prompt(identity: &str, tools: &[ToolDefinition]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "You are {}, a helpful coding agent. You are really good at programming and problem solving. \
         When you need to use tools to help the user, you must wrap your tool calls in XML tags.",
        identity
    );

    out.push_str("\nAVAILABLE TOOLS:\n");
    for tool in tools {
        let _ = writeln!(out, "- {}: {}", tool.name, tool.description);
        for param in &tool.params {
            let _ = writeln!(
                out,
                "    - {}{}: {}",
                param.name,
                if param.required { "" } else { " (optional)" },
                param.description
            );
        }
    }

    out.push_str("\nTOOL CALL FORMAT:\nWhen you need to use a tool, wrap it in XML tags like this:\n\n");
    write_call(
        &mut out,
        "TOOL_NAME",
        &[
            ("PARAMETER_NAME", "PARAMETER_VALUE"),
            ("PARAMETER_NAME2", "PARAMETER_VALUE2"),
        ],
    );

    out.push_str("\nEXAMPLES:\n");
    for tool in tools {
        if let Some(kind) = ToolKind::parse(&tool.name) {
            let (title, params) = example(kind);
            let _ = writeln!(out, "\n{}:", title);
            write_call(&mut out, &tool.name, &params);
        }
    }

    out.push_str(
        "\nIMPORTANT RULES:\n\
         1. Always use XML tags when you need to call a tool\n\
         2. You can include regular text before or after tool calls to explain what you're doing\n\
         3. You can make multiple tool calls in a single response if needed; they run in order\n\
         4. Writes, deletions, directory creation and commands are confirmed by the user first\n\
         5. If you don't need to use any tools, respond normally without XML tags\n\
         6. Always be helpful, clear, and explain your actions to the user",
    );
    out
}
