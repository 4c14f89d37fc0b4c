//! Shared application state.

use std::sync::Arc;

use statusguard_db::Database;

use crate::auth::JwtManager;
use crate::config::AdminConfig;
use crate::mailer::{CommentSender, OutboxCommentSender};
use crate::service::{GuardedCommentService, OrderCommentService};

/// State shared by every handler behind an `Arc`.
pub struct AppState {
    pub db: Database,
    pub config: AdminConfig,
    pub jwt: JwtManager,
    pub comment_sender: Arc<dyn CommentSender>,
    pub comment_service: Arc<dyn OrderCommentService>,
}

impl AppState {
    /// Wires the outbox sender and the guarded comment service.
    pub fn new(db: Database, config: AdminConfig) -> Self {
        let sender: Arc<dyn CommentSender> = Arc::new(OutboxCommentSender::new(
            db.clone(),
            config.mail_from_address.clone(),
            config.mail_from_name.clone(),
        ));
        Self::with_comment_sender(db, config, sender)
    }

    /// Same as [`AppState::new`] with a different comment sender.
    pub fn with_comment_sender(
        db: Database,
        config: AdminConfig,
        comment_sender: Arc<dyn CommentSender>,
    ) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_lifetime_secs);
        let comment_service: Arc<dyn OrderCommentService> = Arc::new(
            GuardedCommentService::new(db.clone(), Arc::clone(&comment_sender)),
        );

        AppState {
            db,
            config,
            jwt,
            comment_sender,
            comment_service,
        }
    }
}
