use std::sync::Arc;

use crate::assets::AssetStore;
use crate::managers::{AssetRecordManager, SingletonManager};
use crate::store::RecordStore;

/// Folder uploaded binaries are stored under in the asset store.
pub const UPLOAD_FOLDER: &str = "portfolio_uploads";

/// Collection names in the record store, one per portfolio entity.
pub mod collections {
    pub const PROFILE: &str = "profiles";
    pub const CV: &str = "cvs";
    pub const PROJECTS: &str = "projects";
    pub const CASE_STUDIES: &str = "casestudies";
    pub const SOCIALS: &str = "socials";
    pub const TECHS: &str = "techs";
    pub const CERTIFICATES: &str = "certificates";
    pub const TESTIMONIALS: &str = "testimonials";
    pub const EXPERIENCES: &str = "experiences";
}

/// Shared application state available to all handlers via `State<AppState>`.
/// Cheaply cloneable; the stores are stateless client handles.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordStore>,
    pub assets: Arc<dyn AssetStore>,
}

impl AppState {
    pub fn new(records: Arc<dyn RecordStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self { records, assets }
    }

    pub fn profile_manager(&self) -> SingletonManager {
        SingletonManager::new(
            self.records.clone(),
            self.assets.clone(),
            collections::PROFILE,
            UPLOAD_FOLDER,
        )
    }

    pub fn cv_manager(&self) -> SingletonManager {
        SingletonManager::new(
            self.records.clone(),
            self.assets.clone(),
            collections::CV,
            UPLOAD_FOLDER,
        )
    }

    pub fn project_manager(&self) -> AssetRecordManager {
        AssetRecordManager::new(
            self.records.clone(),
            self.assets.clone(),
            collections::PROJECTS,
            UPLOAD_FOLDER,
            &["title", "type"],
        )
    }

    pub fn case_study_manager(&self) -> AssetRecordManager {
        AssetRecordManager::new(
            self.records.clone(),
            self.assets.clone(),
            collections::CASE_STUDIES,
            UPLOAD_FOLDER,
            &["title", "description"],
        )
    }
}
