use metrics_exporter_prometheus::PrometheusHandle;
use networking_lab::admin::AdminService;
use networking_lab::config::{AppConfig, QuizConfig};
use networking_lab::leads::{JsonFileLeadStore, LeadService};
use networking_lab::quiz::{CatalogError, QuestionCatalog, ScoringEngine};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Services shared by the HTTP routers, all backed by one data directory.
pub(crate) struct Services {
    pub(crate) leads: Arc<LeadService<JsonFileLeadStore>>,
    pub(crate) admin: Arc<AdminService<JsonFileLeadStore>>,
}

impl Services {
    pub(crate) fn from_config(config: &AppConfig, catalog: QuestionCatalog) -> Self {
        let leads = Arc::new(lead_service(&config.storage.data_dir, catalog));
        let admin = Arc::new(AdminService::from_config(leads.clone(), &config.admin));
        Self { leads, admin }
    }
}

pub(crate) fn lead_service(data_dir: &Path, catalog: QuestionCatalog) -> LeadService<JsonFileLeadStore> {
    let engine = Arc::new(ScoringEngine::new(Arc::new(catalog)));
    let store = Arc::new(JsonFileLeadStore::new(data_dir));
    LeadService::new(store, engine)
}

/// The configured catalog file, or the built-in quiz when none is set.
pub(crate) fn load_catalog(config: &QuizConfig) -> Result<QuestionCatalog, CatalogError> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = QuestionCatalog::from_path(path)?;
            info!(path = %path.display(), questions = catalog.questions().len(), "question catalog loaded");
            Ok(catalog)
        }
        None => Ok(QuestionCatalog::standard()),
    }
}
