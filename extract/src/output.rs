//! Output rendering for extracted commands.
//!
//! The extraction result can be rendered as a generated C# source file (the
//! consuming editor extension embeds the command data as a static array), as
//! JSON, or as a plain-text debug dump for eyeballing the fragment stream.

use chrono::Local;
use doxy_commands_core::{Command, Fragment, FragmentKind, render_fragments};

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    CSharp,
    Json,
    Dump,
}

/// Settings for the generated C# source file.
#[derive(Debug, Clone)]
pub struct CSharpOptions {
    /// Namespace wrapping the generated class.
    pub namespace: String,
    /// Name of the generated class.
    pub class_name: String,
    /// Base URL of the help page, combined with each command's anchor to
    /// form its documentation deep link.
    pub source_url: String,
    /// Timestamp embedded in the file header; the current local time when
    /// `None`. Tests pin it to keep output reproducible.
    pub generated_at: Option<String>,
}

impl Default for CSharpOptions {
    fn default() -> Self {
        Self {
            namespace: "VSDoxyHighlighter".to_string(),
            class_name: "DoxygenCommandsGeneratedFromHelpPage".to_string(),
            source_url: "https://www.doxygen.nl/manual/commands.html".to_string(),
            generated_at: None,
        }
    }
}

/// Formats commands in the requested output format.
pub fn format_commands(
    commands: &[Command],
    format: OutputFormat,
    csharp: &CSharpOptions,
) -> Result<String, String> {
    match format {
        OutputFormat::CSharp => Ok(render_csharp(commands, csharp)),
        OutputFormat::Json => serde_json::to_string_pretty(commands)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Dump => Ok(render_dump(commands)),
    }
}

/// Escapes content for embedding in a C# string literal. Carriage returns
/// are dropped entirely rather than escaped.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\r' => {}
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

fn kind_symbol(kind: FragmentKind) -> &'static str {
    match kind {
        FragmentKind::Text => "FragmentKind.Text",
        FragmentKind::Code => "FragmentKind.Code",
        FragmentKind::Emphasis => "FragmentKind.Emphasis",
        FragmentKind::Note => "FragmentKind.Note",
        FragmentKind::Warning => "FragmentKind.Warning",
        FragmentKind::CrossReference => "FragmentKind.CrossReference",
    }
}

fn fragment_initializer(fragment: &Fragment) -> String {
    let mut out = format!(
        "new object[] {{ {}, \"{}\"",
        kind_symbol(fragment.kind),
        escape(&fragment.content)
    );
    if let Some(url) = &fragment.hyperlink {
        out.push_str(&format!(", \"{}\"", escape(url)));
    }
    out.push_str(" }");
    out
}

/// Renders the commands as a self-contained C# source file.
pub fn render_csharp(commands: &[Command], options: &CSharpOptions) -> String {
    let generated_at = options
        .generated_at
        .clone()
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d %H:%M:%S").to_string());

    let name_width = commands
        .iter()
        .map(|command| escape(&command.name).len())
        .max()
        .unwrap_or(0);
    let parameters_width = commands
        .iter()
        .map(|command| escape(&command.parameters).len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "// This file was automatically generated from {} on {}.\n",
        options.source_url, generated_at
    ));
    out.push_str("// Do not edit it by hand.\n\n");
    out.push_str(&format!("namespace {}\n", options.namespace));
    out.push_str("{\n");
    out.push_str(&format!("  class {}\n", options.class_name));
    out.push_str("  {\n");
    out.push_str("    public static readonly DoxygenHelpPageCommand[] cCommands = {\n");

    for command in commands {
        let name = escape(&command.name);
        let parameters = escape(&command.parameters);
        out.push_str(&format!(
            "      new DoxygenHelpPageCommand(\"{name}\",{} \"{parameters}\",{} \"{}\", new object[] {{\n",
            " ".repeat(name_width - name.len()),
            " ".repeat(parameters_width - parameters.len()),
            escape(&command.documentation_url(&options.source_url)),
        ));
        for fragment in &command.body {
            out.push_str(&format!("        {},\n", fragment_initializer(fragment)));
        }
        out.push_str("      }),\n");
    }

    out.push_str("    };\n");
    out.push_str("  }\n");
    out.push_str("}\n");
    out
}

/// Renders a plain-text dump of every command, with the fragment stream
/// shown through the lossless debug stringification.
pub fn render_dump(commands: &[Command]) -> String {
    let mut out = String::new();
    for command in commands {
        out.push_str("====================================\n");
        out.push_str(&format!("Command: {}\n", command.name));
        out.push_str(&format!("Parameters: {}\n", command.parameters));
        out.push_str(&format!("Anchor: {}\n", command.anchor));
        out.push_str("Help text:\n");
        out.push_str(&render_fragments(&command.body));
        out.push_str("\n<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<\n\n\n");
    }
    out
}
