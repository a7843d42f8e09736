/// Rendering a [`DefinitionDescriptor`] for the driver.
///
/// Two formats exist: the plain text line `package [container] name`, and
/// a tab-indented JSON record
///
/// ```json
/// {
/// 	"Name": "Do",
/// 	"Package": "net/http",
/// 	"Container": "Client",
/// 	"IsGoRepoPath": true
/// }
/// ```
///
/// where missing fields are empty strings.
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::types::DefinitionDescriptor;

/// The structured output record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DefInfo {
    pub name: String,
    pub package: String,
    pub container: String,
    /// Whether the package is part of the Go distribution (`fmt`,
    /// `net/http`).
    pub is_go_repo_path: bool,
}

impl DefInfo {
    pub fn new(desc: &DefinitionDescriptor, goroot: Option<&Path>) -> Self {
        Self {
            name: desc.name.clone().unwrap_or_default(),
            package: desc.package.clone(),
            container: desc.container.clone().unwrap_or_default(),
            is_go_repo_path: is_go_repo_path(&desc.package, goroot),
        }
    }
}

/// The text form, newline-terminated.
pub fn render_text(desc: &DefinitionDescriptor) -> String {
    format!("{}\n", desc)
}

/// The JSON form, indented with tabs.
pub fn render_json(
    desc: &DefinitionDescriptor,
    goroot: Option<&Path>,
) -> Result<String, serde_json::Error> {
    let info = DefInfo::new(desc, goroot);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    info.serialize(&mut ser)?;
    // serde_json only ever writes UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Whether `package` belongs to the Go distribution.
///
/// With a GOROOT the package directory must exist under `$GOROOT/src`.
/// Without one, standard packages are recognised by a first path element
/// that contains no dot (`net/http` but not `github.com/x/y`).
pub fn is_go_repo_path(package: &str, goroot: Option<&Path>) -> bool {
    if package.is_empty() {
        return false;
    }
    match goroot {
        Some(root) => root.join("src").join(package).is_dir(),
        None => package
            .split('/')
            .next()
            .is_some_and(|first| !first.contains('.')),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
