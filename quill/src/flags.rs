use std::path::PathBuf;

xflags::xflags! {
    /// Builds and browses a documentation manifest.
    cmd quill {
        /// Scans the content directory and writes the manifest.
        cmd generate {
            /// Project directory. Defaults to the working directory.
            optional project: PathBuf
            /// Keep running and regenerate on every change.
            optional -w, --watch
        }

        /// Opens the generated site and prints the rendered page.
        cmd show {
            /// Project directory. Defaults to the working directory.
            optional project: PathBuf
            /// Document path or `#fragment` to open instead of the default.
            optional -d, --doc doc: String
            /// Filters the sidebar.
            optional -q, --query query: String
        }
    }
}

impl Quill {
    pub fn project(&self) -> PathBuf {
        let project = match &self.subcommand {
            QuillCmd::Generate(cmd) => cmd.project.clone(),
            QuillCmd::Show(cmd) => cmd.project.clone(),
        };

        project.unwrap_or_else(|| PathBuf::from("."))
    }
}
