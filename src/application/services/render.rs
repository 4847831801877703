//! Diagram rendering service
//!
//! Loads a trie, walks it into a [`Diagram`] and hands the diagram to a
//! [`DiagramRenderer`]. The Graphviz renderer shells out to `dot` through the
//! [`CommandRunner`] boundary so it can be replaced in tests.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::services::loader::TrieLoader;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{build_diagram, to_dot, Diagram, WalkOptions};
use crate::infrastructure::traits::{CommandRunner, FileSystem};

/// Backend that turns a finished diagram into an output file.
pub trait DiagramRenderer: Send + Sync {
    /// Render `diagram` to `<stem>.<format>` and return the written path.
    fn render(&self, diagram: &Diagram, stem: &Path, format: &str) -> ApplicationResult<PathBuf>;
}

/// Output stem for `input`: the explicit `output` if given, otherwise
/// `input` with its extension stripped.
pub fn output_stem(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(o) => o.to_path_buf(),
        None => input.with_extension(""),
    }
}

/// `<stem>.<format>`, appending rather than replacing any extension on `stem`.
pub fn output_file(stem: &Path, format: &str) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(".");
    name.push(format);
    PathBuf::from(name)
}

/// Renders diagrams with the Graphviz `dot` executable.
pub struct GraphvizRenderer {
    fs: Arc<dyn FileSystem>,
    cmd: Arc<dyn CommandRunner>,
    dot_command: String,
}

impl GraphvizRenderer {
    pub fn new(fs: Arc<dyn FileSystem>, cmd: Arc<dyn CommandRunner>, dot_command: String) -> Self {
        Self {
            fs,
            cmd,
            dot_command,
        }
    }

    fn unavailable(&self, message: impl Into<String>) -> ApplicationError {
        ApplicationError::RenderBackendUnavailable {
            command: self.dot_command.clone(),
            message: message.into(),
        }
    }

    /// Outermost ancestor of `path` that does not exist yet.
    fn missing_dir(&self, path: &Path) -> Option<PathBuf> {
        path.parent()?
            .ancestors()
            .take_while(|dir| !dir.as_os_str().is_empty() && !self.fs.exists(dir))
            .last()
            .map(Path::to_path_buf)
    }

    fn run_dot(&self, format: &str, output: &Path, dot_path: &Path) -> ApplicationResult<()> {
        let format_arg = format!("-T{format}");
        let output_arg = output.to_string_lossy();
        let input_arg = dot_path.to_string_lossy();
        debug!(
            "render: {} {} -o {} {}",
            self.dot_command, format_arg, output_arg, input_arg
        );
        let result = self
            .cmd
            .run(
                &self.dot_command,
                &[format_arg.as_str(), "-o", &*output_arg, &*input_arg],
            )
            .map_err(|e| self.unavailable(e.to_string()))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let message = match stderr.trim() {
                "" => format!("exited with {}", result.status),
                msg => msg.to_string(),
            };
            return Err(self.unavailable(message));
        }
        Ok(())
    }
}

impl DiagramRenderer for GraphvizRenderer {
    #[instrument(level = "debug", skip(self, diagram), fields(nodes = diagram.nodes.len()))]
    fn render(&self, diagram: &Diagram, stem: &Path, format: &str) -> ApplicationResult<PathBuf> {
        let output = output_file(stem, format);

        // Intermediate DOT document, removed once `dot` is done with it
        let mut dot_file = tempfile::Builder::new()
            .prefix("trieviz-")
            .suffix(".dot")
            .tempfile()
            .map_err(|e| ApplicationError::OperationFailed {
                context: "create temporary DOT file".to_string(),
                source: Box::new(e),
            })?;
        let dot_path = dot_file.path().to_path_buf();
        dot_file
            .write_all(to_dot(diagram).as_bytes())
            .and_then(|_| dot_file.flush())
            .with_path_context("write DOT file", &dot_path)?;

        let created_dir = self.missing_dir(&output);
        let result = self
            .fs
            .ensure_parent(&output)
            .with_path_context("create output directory for", &output)
            .and_then(|_| self.run_dot(format, &output, &dot_path));

        if let Err(e) = dot_file.close() {
            warn!("could not remove {}: {}", dot_path.display(), e);
        }
        if result.is_err() {
            if let Some(dir) = created_dir {
                debug!("render failed, removing {}", dir.display());
                if let Err(e) = self.fs.remove_dir_all(&dir) {
                    warn!("could not remove {}: {}", dir.display(), e);
                }
            }
        }
        result?;

        info!("rendered {}", output.display());
        Ok(output)
    }
}

/// Load, walk and render in one go.
pub struct RenderService {
    loader: TrieLoader,
    renderer: Arc<dyn DiagramRenderer>,
    settings: Arc<Settings>,
}

impl RenderService {
    pub fn new(
        loader: TrieLoader,
        renderer: Arc<dyn DiagramRenderer>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            loader,
            renderer,
            settings,
        }
    }

    fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            count_policy: self.settings.count_policy,
            max_depth: self.settings.max_depth,
        }
    }

    /// Load `input` and build its diagram without rendering it.
    #[instrument(level = "debug", skip(self))]
    pub fn diagram(&self, input: &Path) -> ApplicationResult<Diagram> {
        let loaded = self.loader.load(input)?;
        let diagram = build_diagram(&loaded.root, &loaded.metadata, &self.walk_options())?
            .with_rankdir(self.settings.rankdir.clone());
        debug!(
            "diagram: {} nodes, {} edges, {} anomalies",
            diagram.nodes.len(),
            diagram.edges.len(),
            diagram.anomalies().count()
        );
        Ok(diagram)
    }

    /// Render `input` to `<output>.<format>`, deriving the output stem from
    /// `input` when none is given. Returns the written path.
    #[instrument(level = "debug", skip(self))]
    pub fn render(&self, input: &Path, output: Option<&Path>) -> ApplicationResult<PathBuf> {
        let diagram = self.diagram(input)?;
        let stem = output_stem(input, output);
        self.renderer.render(&diagram, &stem, &self.settings.format)
    }
}
