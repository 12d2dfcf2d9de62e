use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::analytics::{DashboardSummary, TimeRange};
use super::export::{render_export, ExportError, ExportFile, ExportFormat, ExportKind};
use super::session::{AdminCredentials, AdminSessionSigner, SessionClaims, SessionError};
use crate::config::AdminConfig;
use crate::leads::{LeadRepository, LeadService, LeadServiceError, LeadSnapshot, RawLeadFiles};

/// Admin surface over the captured leads: login, dashboard, and exports.
pub struct AdminService<R> {
    leads: Arc<LeadService<R>>,
    credentials: Option<AdminCredentials>,
    signer: Option<AdminSessionSigner>,
}

impl<R> AdminService<R>
where
    R: LeadRepository + 'static,
{
    pub fn new(
        leads: Arc<LeadService<R>>,
        credentials: Option<AdminCredentials>,
        signer: Option<AdminSessionSigner>,
    ) -> Self {
        Self {
            leads,
            credentials,
            signer,
        }
    }

    /// Missing values leave login disabled rather than failing startup.
    pub fn from_config(leads: Arc<LeadService<R>>, config: &AdminConfig) -> Self {
        let signer = match AdminSessionSigner::from_config(config) {
            Ok(signer) => Some(signer),
            Err(err) => {
                if config.username.is_some() {
                    warn!(error = %err, "admin login disabled");
                }
                None
            }
        };
        Self::new(leads, AdminCredentials::from_config(config), signer)
    }

    pub fn signer(&self) -> Option<&AdminSessionSigner> {
        self.signer.as_ref()
    }

    /// Check credentials and issue a session token.
    pub fn login(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AdminError> {
        let (Some(credentials), Some(signer)) = (&self.credentials, &self.signer) else {
            return Err(AdminError::NotConfigured);
        };
        if !credentials.matches(username, password) {
            warn!("admin login rejected");
            return Err(AdminError::InvalidCredentials);
        }
        let token = signer.issue(username.trim(), now)?;
        info!(username = username.trim(), "admin login");
        Ok(token)
    }

    pub fn authorize(
        &self,
        cookie_header: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, AdminError> {
        let signer = self.signer.as_ref().ok_or(AdminError::NotConfigured)?;
        Ok(signer.verify_cookie_header(cookie_header, now)?)
    }

    pub fn dashboard(
        &self,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Result<DashboardSummary, AdminError> {
        let snapshot = self.leads.snapshot()?;
        Ok(DashboardSummary::build(
            &snapshot,
            range,
            now,
            self.leads.catalog(),
        ))
    }

    pub fn export(&self, kind: ExportKind, format: ExportFormat) -> Result<ExportFile, AdminError> {
        let (snapshot, raw) = match (kind.needs_leads(), format) {
            (true, ExportFormat::Json) => (LeadSnapshot::default(), self.leads.raw_files()?),
            (true, ExportFormat::Csv) => (self.leads.snapshot()?, RawLeadFiles::default()),
            (false, _) => (LeadSnapshot::default(), RawLeadFiles::default()),
        };
        let file = render_export(kind, format, &snapshot, &raw, self.leads.catalog())?;
        info!(kind = kind.key(), format = format.extension(), bytes = file.body.len(), "export served");
        Ok(file)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Admin login not configured")]
    NotConfigured,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Leads(#[from] LeadServiceError),
}
