//! Project Catalog
//!
//! Single source of truth for every destination the portal advertises.
//! All scenes read the catalog rather than owning copies, so a project added
//! here shows up in every interface that has a mapping for it.
//!
//! The catalog is compiled into the binary from `assets/config/projects.ron`
//! and is immutable for the lifetime of the process.

use std::collections::HashSet;

use serde::Deserialize;

use crate::interfaces::SceneKind;

/// Built-in catalog document
const PROJECTS_RON: &str = include_str!("../assets/config/projects.ron");

/// Errors raised while loading the static catalog or registry documents
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse {document}: {message}")]
    Parse {
        document: &'static str,
        message: String,
    },
    #[error("duplicate project id: {0}")]
    DuplicateProject(String),
    #[error("live project {id} has no navigable url: {url:?}")]
    InvalidUrl { id: String, url: String },
    #[error("duplicate interface id: {0}")]
    DuplicateInterface(u32),
    #[error("interface ids must be positive (found 0 on {slug})")]
    InvalidInterfaceId { slug: String },
}

/// Release status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ProjectStatus {
    Live,
    ComingSoon,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Live => "Live",
            ProjectStatus::ComingSoon => "Coming soon",
        }
    }
}

/// Display theme. Opaque to navigation; only scenes interpret it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectTheme {
    /// `#RRGGBB`
    pub primary_color: String,
    pub icon: String,
}

impl ProjectTheme {
    /// Parse `primary_color` into normalized RGB, if well formed
    pub fn rgb(&self) -> Option<(f32, f32, f32)> {
        let hex = self.primary_color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GraphPosition {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeuralMapMapping {
    pub position: GraphPosition,
    /// Related project ids; ids that do not resolve are skipped
    #[serde(default)]
    pub connections: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum BodyPart {
    Ear,
    Brain,
    Mouth,
    Hands,
    Eye,
    Heart,
}

impl BodyPart {
    pub fn label(&self) -> &'static str {
        match self {
            BodyPart::Ear => "Ear",
            BodyPart::Brain => "Brain",
            BodyPart::Mouth => "Mouth",
            BodyPart::Hands => "Hands",
            BodyPart::Eye => "Eye",
            BodyPart::Heart => "Heart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AnatomicalMapMapping {
    pub body_part: BodyPart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RetroIconType {
    MediaPlayer,
    Terminal,
    Folder,
    Sticky,
    Screensaver,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RetroOsMapping {
    pub icon_type: RetroIconType,
    pub filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PirateBroadcastMapping {
    /// FM frequency in MHz
    pub frequency: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PanelType {
    Oscilloscope,
    Monitor,
    Typewriter,
    Clipboard,
    Radar,
    TapeRecorder,
}

impl PanelType {
    pub fn label(&self) -> &'static str {
        match self {
            PanelType::Oscilloscope => "Oscilloscope",
            PanelType::Monitor => "Monitor",
            PanelType::Typewriter => "Typewriter",
            PanelType::Clipboard => "Clipboard",
            PanelType::Radar => "Radar",
            PanelType::TapeRecorder => "Tape Recorder",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ControlRoomMapping {
    pub panel_type: PanelType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ProductType {
    Cassette,
    PillBottle,
    Spellbook,
    Coin,
    Viewmaster,
    Vhs,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VendingMachineMapping {
    pub slot: String,
    pub product_type: ProductType,
}

/// Per-scene presentation of a project. Pure data; a missing entry means
/// the scene renders nothing for this project.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneMappings {
    pub neural_map: Option<NeuralMapMapping>,
    pub anatomical_map: Option<AnatomicalMapMapping>,
    pub retro_os: Option<RetroOsMapping>,
    pub pirate_broadcast: Option<PirateBroadcastMapping>,
    pub control_room: Option<ControlRoomMapping>,
    pub vending_machine: Option<VendingMachineMapping>,
}

/// One external destination
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
    pub status: ProjectStatus,
    pub theme: ProjectTheme,
    #[serde(default)]
    pub mappings: SceneMappings,
}

impl Project {
    pub fn is_live(&self) -> bool {
        self.status == ProjectStatus::Live
    }

    /// Destination to open, or `None` when navigation is suppressed.
    /// Coming-soon projects never navigate, whatever their url says.
    pub fn launch_url(&self) -> Option<&str> {
        match self.status {
            ProjectStatus::Live => Some(self.url.as_str()),
            ProjectStatus::ComingSoon => None,
        }
    }

    /// Short scene-specific label ("88.1 FM", "A1", "LokiTunes.exe", ...)
    pub fn slot_label(&self, kind: SceneKind) -> Option<String> {
        let m = &self.mappings;
        match kind {
            SceneKind::NeuralMap => m
                .neural_map
                .as_ref()
                .map(|n| format!("({:.0}, {:.0})", n.position.x, n.position.y)),
            SceneKind::AnatomicalMap => m.anatomical_map.map(|a| a.body_part.label().to_string()),
            SceneKind::RetroOs => m.retro_os.as_ref().map(|r| r.filename.clone()),
            SceneKind::PirateBroadcast => m
                .pirate_broadcast
                .map(|p| format!("{:.1} FM", p.frequency)),
            SceneKind::ControlRoom => m.control_room.map(|c| c.panel_type.label().to_string()),
            SceneKind::VendingMachine => m.vending_machine.as_ref().map(|v| v.slot.clone()),
        }
    }
}

/// Ordered, immutable collection of projects
#[derive(Debug, Clone, Default)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    /// Load the catalog compiled into the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_ron(PROJECTS_RON)
    }

    /// Parse and validate a catalog document
    pub fn from_ron(source: &str) -> Result<Self, CatalogError> {
        let projects: Vec<Project> = ron::from_str(source).map_err(|e| CatalogError::Parse {
            document: "projects.ron",
            message: e.to_string(),
        })?;
        Self::new(projects)
    }

    pub fn new(projects: Vec<Project>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for project in &projects {
            if !seen.insert(project.id.as_str()) {
                return Err(CatalogError::DuplicateProject(project.id.clone()));
            }
            if project.is_live() && !is_navigable(&project.url) {
                return Err(CatalogError::InvalidUrl {
                    id: project.id.clone(),
                    url: project.url.clone(),
                });
            }
        }
        Ok(Self { projects })
    }

    /// All projects in catalog order. Restartable and stable across calls.
    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Resolved graph neighbours of a project; dangling ids are dropped
    pub fn connections_of(&self, id: &str) -> Vec<&Project> {
        let Some(project) = self.get_by_id(id) else {
            return Vec::new();
        };
        let Some(neural) = &project.mappings.neural_map else {
            return Vec::new();
        };
        neural
            .connections
            .iter()
            .filter_map(|other| self.get_by_id(other))
            .collect()
    }

    /// Project closest to `frequency` within `tolerance` MHz
    pub fn tune(&self, frequency: f32, tolerance: f32) -> Option<&Project> {
        self.projects
            .iter()
            .filter_map(|p| {
                let freq = p.mappings.pirate_broadcast?.frequency;
                let distance = (freq - frequency).abs();
                (distance <= tolerance).then_some((p, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p)
    }

    /// Project stocked in a vending slot (case-insensitive)
    pub fn by_slot(&self, code: &str) -> Option<&Project> {
        let code = code.trim();
        self.projects.iter().find(|p| {
            p.mappings
                .vending_machine
                .as_ref()
                .map(|v| v.slot.eq_ignore_ascii_case(code))
                .unwrap_or(false)
        })
    }
}

fn is_navigable(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, status: ProjectStatus, url: &str) -> Project {
        Project {
            id: id.to_string(),
            name: id.to_uppercase(),
            url: url.to_string(),
            description: String::new(),
            status,
            theme: ProjectTheme {
                primary_color: "#112233".to_string(),
                icon: String::new(),
            },
            mappings: SceneMappings::default(),
        }
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = ProjectCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.list()[0].id, "lokitunes");
        assert_eq!(catalog.list()[5].id, "podcast");
    }

    #[test]
    fn test_list_order_is_stable() {
        let catalog = ProjectCatalog::builtin().unwrap();
        let first: Vec<_> = catalog.list().iter().map(|p| p.id.clone()).collect();
        let second: Vec<_> = catalog.list().iter().map(|p| p.id.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_get_by_id_not_found_is_none() {
        let catalog = ProjectCatalog::builtin().unwrap();
        assert!(catalog.get_by_id("crym").is_some());
        assert!(catalog.get_by_id("does-not-exist").is_none());
    }

    #[test]
    fn test_coming_soon_suppresses_navigation() {
        let catalog = ProjectCatalog::builtin().unwrap();
        let podcast = catalog.get_by_id("podcast").unwrap();
        assert_eq!(podcast.status, ProjectStatus::ComingSoon);
        assert_eq!(podcast.launch_url(), None);

        let loki = catalog.get_by_id("lokitunes").unwrap();
        assert_eq!(loki.launch_url(), Some("https://lokitunes.art"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ProjectCatalog::new(vec![
            project("a", ProjectStatus::Live, "https://a.example"),
            project("a", ProjectStatus::Live, "https://b.example"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateProject(id)) if id == "a"));
    }

    #[test]
    fn test_live_project_requires_url() {
        let result = ProjectCatalog::new(vec![project("a", ProjectStatus::Live, "#")]);
        assert!(matches!(result, Err(CatalogError::InvalidUrl { .. })));

        // Coming soon may carry a placeholder
        let ok = ProjectCatalog::new(vec![project("a", ProjectStatus::ComingSoon, "#")]);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_missing_mapping_degrades_to_none() {
        let catalog = ProjectCatalog::new(vec![project("bare", ProjectStatus::Live, "https://x.io")]).unwrap();
        let bare = catalog.get_by_id("bare").unwrap();
        for kind in SceneKind::ALL {
            assert_eq!(bare.slot_label(kind), None);
        }
    }

    #[test]
    fn test_slot_labels() {
        let catalog = ProjectCatalog::builtin().unwrap();
        let loki = catalog.get_by_id("lokitunes").unwrap();
        assert_eq!(loki.slot_label(SceneKind::PirateBroadcast).as_deref(), Some("88.1 FM"));
        assert_eq!(loki.slot_label(SceneKind::VendingMachine).as_deref(), Some("A1"));
        assert_eq!(loki.slot_label(SceneKind::RetroOs).as_deref(), Some("LokiTunes.exe"));
        assert_eq!(loki.slot_label(SceneKind::AnatomicalMap).as_deref(), Some("Ear"));
    }

    #[test]
    fn test_connections_skip_dangling_ids() {
        let mut a = project("a", ProjectStatus::Live, "https://a.example");
        a.mappings.neural_map = Some(NeuralMapMapping {
            position: GraphPosition { x: 0.0, y: 0.0 },
            connections: vec!["b".to_string(), "ghost".to_string()],
        });
        let b = project("b", ProjectStatus::Live, "https://b.example");
        let catalog = ProjectCatalog::new(vec![a, b]).unwrap();

        let ids: Vec<_> = catalog.connections_of("a").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
        assert!(catalog.connections_of("ghost").is_empty());
    }

    #[test]
    fn test_tune_picks_nearest_within_tolerance() {
        let catalog = ProjectCatalog::builtin().unwrap();
        assert_eq!(catalog.tune(92.4, 0.3).map(|p| p.id.as_str()), Some("matrixarena"));
        assert!(catalog.tune(98.0, 0.3).is_none());
    }

    #[test]
    fn test_by_slot_is_case_insensitive() {
        let catalog = ProjectCatalog::builtin().unwrap();
        assert_eq!(catalog.by_slot("b2").map(|p| p.id.as_str()), Some("bountyhunter"));
        assert!(catalog.by_slot("Z9").is_none());
    }

    #[test]
    fn test_theme_rgb_rejects_non_ascii() {
        // Six bytes, but not six hex digits
        let theme = ProjectTheme {
            primary_color: "#a\u{e9}\u{20ac}".to_string(),
            icon: String::new(),
        };
        assert_eq!(theme.primary_color.len(), 7);
        assert!(theme.rgb().is_none());
    }

    #[test]
    fn test_theme_rgb() {
        let theme = ProjectTheme {
            primary_color: "#FF0080".to_string(),
            icon: String::new(),
        };
        let (r, g, b) = theme.rgb().unwrap();
        assert!((r - 1.0).abs() < 0.001);
        assert!(g.abs() < 0.001);
        assert!((b - 128.0 / 255.0).abs() < 0.001);

        let bad = ProjectTheme {
            primary_color: "red".to_string(),
            icon: String::new(),
        };
        assert!(bad.rgb().is_none());
    }
}
