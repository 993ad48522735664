use crate::app::models::ExtractedFlags;
use std::path::Path;

const HEADER: &str = "#.clangd\nCompileFlags:\n";
const WARNINGS_FLAG: &str = "-Wall";

pub struct OutputGenerator;

impl OutputGenerator {
    /// Flags in output order: defines, the optional warnings flag, then include paths
    /// made absolute against `root`.
    pub fn compile_flags(root: &Path, flags: &ExtractedFlags, wall: bool) -> Vec<String> {
        let mut out: Vec<String> = flags
            .defines
            .iter()
            .map(|define| format!("-D{}", define))
            .collect();

        if wall {
            out.push(WARNINGS_FLAG.to_string());
        }

        let root = root.display();
        out.extend(
            flags
                .header_paths
                .iter()
                .map(|path| format!("-I{}/{}", root, path)),
        );
        out
    }

    pub fn format_clangd(compile_flags: &[String]) -> String {
        let mut out = String::from(HEADER);
        out.push_str("\tAdd: [ ");
        out.push_str(&compile_flags.join(", "));
        out.push_str(" ]\n\n");
        out
    }

    pub fn generate(root: &Path, flags: &ExtractedFlags, wall: bool) -> String {
        Self::format_clangd(&Self::compile_flags(root, flags, wall))
    }
}
