//! Named asset catalog: loads every model and texture the scene uses and
//! reports per-name readiness.
//!
//! The scene stays in [`GameState::Loading`] until every entry has either
//! loaded or failed. A failed entry is logged and simply never becomes
//! ready, so channels that depend on it no-op instead of erroring.

use bevy::asset::{LoadState, UntypedAssetId};
use bevy::platform::collections::{HashMap, HashSet};
use bevy::prelude::*;

use crate::{FrameSet, GameState};

/// How a catalog entry is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// glTF binary; the first scene is loaded.
    Model,
    /// Image file.
    Texture,
}

/// One catalog entry.
#[derive(Clone, Copy, Debug)]
pub struct Source {
    /// Name used by the rest of the scene.
    pub name: &'static str,
    /// Loader to use.
    pub kind: SourceKind,
    /// Path relative to the `assets/` directory.
    pub path: &'static str,
}

/// Every asset the scene loads.
pub const SOURCES: &[Source] = &[
    Source {
        name: "textModel",
        kind: SourceKind::Model,
        path: "models/text.glb",
    },
    Source {
        name: "interactiveText",
        kind: SourceKind::Model,
        path: "models/interactive-text.glb",
    },
    Source {
        name: "monitorModel",
        kind: SourceKind::Model,
        path: "models/monitor.glb",
    },
    Source {
        name: "background",
        kind: SourceKind::Texture,
        path: "textures/background.jpg",
    },
    Source {
        name: "earthColorTexture",
        kind: SourceKind::Texture,
        path: "textures/earth_color_map.jpg",
    },
    Source {
        name: "earthSpecularTexture",
        kind: SourceKind::Texture,
        path: "textures/earth_specular_map.png",
    },
    Source {
        name: "earthTopographyTexture",
        kind: SourceKind::Texture,
        path: "textures/topography_5k.png",
    },
    Source {
        name: "cloudsTexture",
        kind: SourceKind::Texture,
        path: "textures/earth_clouds.jpg",
    },
    Source {
        name: "screen",
        kind: SourceKind::Texture,
        path: "textures/screen.jpg",
    },
];

/// Typed handle held by the catalog.
#[derive(Clone, Debug)]
pub enum CatalogHandle {
    /// First scene of a glTF file.
    Scene(Handle<Scene>),
    /// Image.
    Image(Handle<Image>),
}

impl CatalogHandle {
    fn id(&self) -> UntypedAssetId {
        match self {
            Self::Scene(h) => h.id().untyped(),
            Self::Image(h) => h.id().untyped(),
        }
    }
}

/// Handles for every [`Source`], keyed by name.
#[derive(Resource, Default)]
pub struct AssetCatalog {
    handles: HashMap<&'static str, CatalogHandle>,
}

impl AssetCatalog {
    /// Scene handle for a model entry.
    pub fn scene(&self, name: &str) -> Option<Handle<Scene>> {
        match self.handles.get(name)? {
            CatalogHandle::Scene(h) => Some(h.clone()),
            CatalogHandle::Image(_) => None,
        }
    }

    /// Image handle for a texture entry.
    pub fn image(&self, name: &str) -> Option<Handle<Image>> {
        match self.handles.get(name)? {
            CatalogHandle::Image(h) => Some(h.clone()),
            CatalogHandle::Scene(_) => None,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Names of entries that have fully loaded, refreshed every frame.
#[derive(Resource, Default, Debug)]
pub struct AssetReadiness {
    ready: HashSet<String>,
    failed: HashSet<String>,
}

impl AssetReadiness {
    /// `true` once the named asset and its dependencies are loaded.
    pub fn is_ready(&self, name: &str) -> bool {
        self.ready.contains(name)
    }

    /// Marks an entry loaded.
    pub fn mark_ready(&mut self, name: impl Into<String>) {
        self.ready.insert(name.into());
    }

    /// Marks an entry failed. Failed entries are never ready.
    pub fn mark_failed(&mut self, name: impl Into<String>) -> bool {
        self.failed.insert(name.into())
    }

    /// Entries that are loaded or failed.
    pub fn settled(&self) -> usize {
        self.ready.len() + self.failed.len()
    }
}

/// Whole-number load percentage shown while loading.
pub fn load_percent(settled: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    ((settled as f32 / total as f32) * 100.0).round() as u32
}

/// Loads the catalog and tracks readiness.
pub struct AssetCatalogPlugin;

impl Plugin for AssetCatalogPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AssetReadiness>()
            .add_systems(PreStartup, load_catalog)
            .add_systems(Update, refresh_readiness.in_set(FrameSet::Collaborators))
            .add_systems(
                Update,
                finish_loading
                    .after(refresh_readiness)
                    .in_set(FrameSet::Collaborators)
                    .run_if(in_state(GameState::Loading)),
            );
    }
}

/// Starts loading every [`SOURCES`] entry.
pub fn load_catalog(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handles = SOURCES
        .iter()
        .map(|source| {
            let handle = match source.kind {
                SourceKind::Model => CatalogHandle::Scene(
                    asset_server.load(GltfAssetLabel::Scene(0).from_asset(source.path)),
                ),
                SourceKind::Texture => CatalogHandle::Image(asset_server.load(source.path)),
            };
            (source.name, handle)
        })
        .collect();
    commands.insert_resource(AssetCatalog { handles });
}

/// Moves newly loaded or failed entries into [`AssetReadiness`].
pub fn refresh_readiness(
    catalog: Option<Res<AssetCatalog>>,
    asset_server: Res<AssetServer>,
    mut readiness: ResMut<AssetReadiness>,
) {
    let Some(catalog) = catalog else { return };
    if readiness.settled() == catalog.len() {
        return;
    }

    for (&name, handle) in &catalog.handles {
        if readiness.is_ready(name) {
            continue;
        }
        let id = handle.id();
        if asset_server.is_loaded_with_dependencies(id) {
            debug!("asset `{name}` loaded");
            readiness.mark_ready(name);
        } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(id)
            && readiness.mark_failed(name)
        {
            warn!("asset `{name}` failed to load: {err}");
        }
    }
}

/// Logs load progress and enters the intro once every entry has settled.
pub fn finish_loading(
    catalog: Option<Res<AssetCatalog>>,
    readiness: Res<AssetReadiness>,
    mut next: ResMut<NextState<GameState>>,
    mut last_percent: Local<Option<u32>>,
) {
    let Some(catalog) = catalog else { return };
    let percent = load_percent(readiness.settled(), catalog.len());
    if *last_percent != Some(percent) {
        *last_percent = Some(percent);
        info!("loading {percent} %");
    }
    if percent == 100 {
        next.set(GameState::Intro);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_whole_numbers() {
        assert_eq!(load_percent(0, 9), 0);
        assert_eq!(load_percent(1, 9), 11);
        assert_eq!(load_percent(5, 9), 56);
        assert_eq!(load_percent(9, 9), 100);
    }

    #[test]
    fn empty_catalog_is_complete() {
        assert_eq!(load_percent(0, 0), 100);
    }

    #[test]
    fn failed_entries_settle_but_never_become_ready() {
        let mut readiness = AssetReadiness::default();
        readiness.mark_ready("textModel");
        assert!(readiness.mark_failed("monitorModel"));
        assert!(!readiness.mark_failed("monitorModel"));
        assert!(readiness.is_ready("textModel"));
        assert!(!readiness.is_ready("monitorModel"));
        assert_eq!(readiness.settled(), 2);
    }

    #[test]
    fn source_names_are_unique() {
        let names: HashSet<&str> = SOURCES.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), SOURCES.len());
    }
}
