//! Interface registry
//!
//! Fixed set of selectable scenes, one entry each. Registry order is the
//! selection-grid order and the population the dice draws from.
//! Ids are stable identifiers, not indices: they need not be dense.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use crate::project::CatalogError;
use crate::scenes::{CatalogScene, Scene};

/// Built-in registry document
const INTERFACES_RON: &str = include_str!("../assets/config/interfaces.ron");

/// Stable numeric identity of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct InterfaceId(pub u32);

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renderer handle. Resolved to a live scene only when the scene is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SceneKind {
    NeuralMap,
    AnatomicalMap,
    RetroOs,
    PirateBroadcast,
    ControlRoom,
    VendingMachine,
}

impl SceneKind {
    pub const ALL: [SceneKind; 6] = [
        SceneKind::NeuralMap,
        SceneKind::AnatomicalMap,
        SceneKind::RetroOs,
        SceneKind::PirateBroadcast,
        SceneKind::ControlRoom,
        SceneKind::VendingMachine,
    ];

    /// Build the renderer for this scene
    pub fn instantiate(self) -> Box<dyn Scene> {
        Box::new(CatalogScene::new(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn label(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MobileSupport {
    Full,
    Partial,
    DesktopOnly,
}

impl MobileSupport {
    pub fn label(&self) -> &'static str {
        match self {
            MobileSupport::Full => "mobile",
            MobileSupport::Partial => "partial",
            MobileSupport::DesktopOnly => "desktop only",
        }
    }
}

/// One selectable visual experience
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InterfaceDescriptor {
    pub id: InterfaceId,
    /// Styling/theming key, not identity
    pub slug: String,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub renderer: SceneKind,
    pub complexity: Complexity,
    pub mobile_support: MobileSupport,
    /// Scene draws its own back control; the shell hides the default one
    #[serde(default)]
    pub custom_back: bool,
}

/// Immutable, ordered registry of scenes
#[derive(Debug, Clone, Default)]
pub struct InterfaceRegistry {
    interfaces: Vec<InterfaceDescriptor>,
}

impl InterfaceRegistry {
    /// Load the registry compiled into the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_ron(INTERFACES_RON)
    }

    pub fn from_ron(source: &str) -> Result<Self, CatalogError> {
        let interfaces: Vec<InterfaceDescriptor> =
            ron::from_str(source).map_err(|e| CatalogError::Parse {
                document: "interfaces.ron",
                message: e.to_string(),
            })?;
        Self::new(interfaces)
    }

    pub fn new(interfaces: Vec<InterfaceDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for iface in &interfaces {
            if iface.id.0 == 0 {
                return Err(CatalogError::InvalidInterfaceId {
                    slug: iface.slug.clone(),
                });
            }
            if !seen.insert(iface.id) {
                return Err(CatalogError::DuplicateInterface(iface.id.0));
            }
        }
        Ok(Self { interfaces })
    }

    /// All interfaces in selection-grid order
    pub fn list(&self) -> &[InterfaceDescriptor] {
        &self.interfaces
    }

    pub fn get_by_id(&self, id: InterfaceId) -> Option<&InterfaceDescriptor> {
        self.interfaces.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Uniform, independent draw over the registry population.
    /// Returns `None` only when the registry is empty.
    pub fn pick_random_id(&self) -> Option<InterfaceId> {
        if self.interfaces.is_empty() {
            return None;
        }
        let len = self.interfaces.len();
        let index = (macroquad::rand::gen_range(0u32, len as u32) as usize).min(len - 1);
        self.interfaces.get(index).map(|i| i.id)
    }
}
