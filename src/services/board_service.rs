/*
 * Responsibility
 * - boards の 5 ユースケース (create / list / get / update / delete)
 * - 作者の解決は IdentityExtractor、永続化は BoardRepo に委譲する
 * - update / delete は「取得 → 作者確認 → 変更」を 1 トランザクション内で行う
 *   (途中で Err を返すと BoardTx が drop され rollback される)
 */
use std::sync::Arc;

use thiserror::Error;

use crate::domain::{Board, NewBoard, Username};
use crate::repos::{BoardRepo, RepoError, board_repo::stamp_now};
use crate::services::auth::{AccessJwtError, IdentityExtractor};

pub const DELETION_COMPLETE: &str = "deletion complete";

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("post not found")]
    NotFound,
    #[error("not the author")]
    Forbidden,
    #[error("invalid token")]
    InvalidToken(#[source] AccessJwtError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct CreateBoard {
    pub title: String,
    pub content: String,
}

/// `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateBoard {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Business-level outcome of a delete, mirrored into the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResult {
    pub code: u16,
    pub message: &'static str,
}

#[derive(Clone)]
pub struct BoardService {
    repo: Arc<dyn BoardRepo>,
    identity: IdentityExtractor,
}

impl BoardService {
    pub fn new(repo: Arc<dyn BoardRepo>, identity: IdentityExtractor) -> Self {
        Self { repo, identity }
    }

    pub async fn create(&self, req: CreateBoard, token: Option<&str>) -> Result<Board, BoardError> {
        let username = self.resolve_username(token)?;

        let board = self
            .repo
            .insert(NewBoard {
                title: req.title,
                content: req.content,
                username,
            })
            .await?;

        tracing::info!(board_id = board.id(), username = %board.username(), "board created");
        Ok(board)
    }

    pub async fn list(&self) -> Result<Vec<Board>, BoardError> {
        Ok(self.repo.list_by_created_desc().await?)
    }

    pub async fn get(&self, board_id: i64) -> Result<Board, BoardError> {
        self.repo
            .find_by_id(board_id)
            .await?
            .ok_or(BoardError::NotFound)
    }

    pub async fn update(
        &self,
        board_id: i64,
        req: UpdateBoard,
        token: Option<&str>,
    ) -> Result<Board, BoardError> {
        let mut tx = self.repo.begin().await?;

        let mut board = tx
            .find_by_id_for_update(board_id)
            .await?
            .ok_or(BoardError::NotFound)?;
        self.ensure_author(&board, token)?;

        board.update(req.title, req.content, stamp_now());
        let updated = tx.update(&board).await?;
        tx.commit().await?;

        tracing::info!(board_id, username = %updated.username(), "board updated");
        Ok(updated)
    }

    pub async fn delete(&self, board_id: i64, token: Option<&str>) -> Result<StatusResult, BoardError> {
        let mut tx = self.repo.begin().await?;

        let board = tx
            .find_by_id_for_update(board_id)
            .await?
            .ok_or(BoardError::NotFound)?;
        self.ensure_author(&board, token)?;

        tx.delete(board_id).await?;
        tx.commit().await?;

        tracing::info!(board_id, username = %board.username(), "board deleted");
        Ok(StatusResult {
            code: 200,
            message: DELETION_COMPLETE,
        })
    }

    fn resolve_username(&self, token: Option<&str>) -> Result<Username, BoardError> {
        self.identity.extract_username(token).map_err(|err| {
            tracing::warn!(error = %err, "access token rejected");
            BoardError::InvalidToken(err)
        })
    }

    fn ensure_author(&self, board: &Board, token: Option<&str>) -> Result<(), BoardError> {
        let username = self.resolve_username(token)?;
        if !board.is_authored_by(&username) {
            tracing::warn!(
                board_id = board.id(),
                author = %board.username(),
                username = %username,
                "rejected change by non-author"
            );
            return Err(BoardError::Forbidden);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::repos::memory::MemoryBoardRepo;
    use crate::services::auth::testing::{fake_identity, token_for};

    fn service() -> BoardService {
        BoardService::new(Arc::new(MemoryBoardRepo::new()), fake_identity())
    }

    fn create_req(title: &str, content: &str) -> CreateBoard {
        CreateBoard {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn title_only(title: &str) -> UpdateBoard {
        UpdateBoard {
            title: Some(title.to_string()),
            content: None,
        }
    }

    #[tokio::test]
    async fn owner_lifecycle_scenario() {
        let svc = service();
        let alice = token_for("alice");
        let bob = token_for("bob");

        let view = svc
            .create(create_req("Hello", "World"), Some(&alice))
            .await
            .unwrap();
        assert_eq!(view.username().as_str(), "alice");

        let err = svc
            .update(view.id(), title_only("Hi"), Some(&bob))
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::Forbidden));

        let updated = svc
            .update(view.id(), title_only("Hi"), Some(&alice))
            .await
            .unwrap();
        assert_eq!(updated.title(), "Hi");
        assert_eq!(updated.content(), "World");

        let status = svc.delete(view.id(), Some(&alice)).await.unwrap();
        assert_eq!(
            status,
            StatusResult {
                code: 200,
                message: "deletion complete"
            }
        );

        let err = svc.get(view.id()).await.unwrap_err();
        assert!(matches!(err, BoardError::NotFound));
    }

    #[tokio::test]
    async fn get_echoes_what_was_created() {
        let svc = service();
        let created = svc
            .create(create_req("title", "content"), Some(&token_for("carol")))
            .await
            .unwrap();

        let fetched = svc.get(created.id()).await.unwrap();

        assert_eq!(fetched.title(), "title");
        assert_eq!(fetched.content(), "content");
        assert_eq!(fetched.username(), &Username::new("carol"));
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn ids_are_unique_and_list_is_newest_first() {
        let svc = service();
        let mut ids = HashSet::new();
        for i in 0..5 {
            let board = svc
                .create(create_req(&format!("t{i}"), "c"), Some(&token_for("alice")))
                .await
                .unwrap();
            assert!(ids.insert(board.id()));
        }

        let listed = svc.list().await.unwrap();

        assert_eq!(listed.len(), 5);
        assert!(
            listed
                .windows(2)
                .all(|w| w[0].created_at() >= w[1].created_at())
        );
        assert_eq!(listed[0].title(), "t4");
    }

    #[tokio::test]
    async fn owner_update_advances_modified_at() {
        let svc = service();
        let alice = token_for("alice");
        let created = svc
            .create(create_req("Hello", "World"), Some(&alice))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = svc
            .update(
                created.id(),
                UpdateBoard {
                    title: Some("new title".to_string()),
                    content: Some("new content".to_string()),
                },
                Some(&alice),
            )
            .await
            .unwrap();

        assert_eq!(updated.title(), "new title");
        assert_eq!(updated.content(), "new content");
        assert!(updated.modified_at() > created.modified_at());
        assert_eq!(updated.created_at(), created.created_at());
        assert_eq!(updated.username(), created.username());
    }

    #[tokio::test]
    async fn back_to_back_updates_each_advance_modified_at() {
        let svc = service();
        let alice = token_for("alice");
        let created = svc
            .create(create_req("Hello", "World"), Some(&alice))
            .await
            .unwrap();

        let first = svc
            .update(created.id(), title_only("one"), Some(&alice))
            .await
            .unwrap();
        let second = svc
            .update(created.id(), title_only("two"), Some(&alice))
            .await
            .unwrap();

        assert!(first.modified_at() > created.modified_at());
        assert!(second.modified_at() > first.modified_at());
        assert_eq!(second.created_at(), created.created_at());
    }

    #[tokio::test]
    async fn non_owner_update_leaves_record_unchanged() {
        let svc = service();
        let created = svc
            .create(create_req("Hello", "World"), Some(&token_for("alice")))
            .await
            .unwrap();

        let err = svc
            .update(created.id(), title_only("hijacked"), Some(&token_for("bob")))
            .await
            .unwrap_err();

        assert!(matches!(err, BoardError::Forbidden));
        assert_eq!(svc.get(created.id()).await.unwrap(), created);
    }

    #[tokio::test]
    async fn non_owner_delete_keeps_record() {
        let svc = service();
        let created = svc
            .create(create_req("Hello", "World"), Some(&token_for("alice")))
            .await
            .unwrap();

        let err = svc
            .delete(created.id(), Some(&token_for("bob")))
            .await
            .unwrap_err();

        assert!(matches!(err, BoardError::Forbidden));
        assert_eq!(svc.get(created.id()).await.unwrap(), created);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("forged-token"))]
    #[tokio::test]
    async fn create_requires_a_valid_token(#[case] token: Option<&str>) {
        let svc = service();

        let err = svc
            .create(create_req("Hello", "World"), token)
            .await
            .unwrap_err();

        assert!(matches!(err, BoardError::InvalidToken(_)));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_board_is_reported_before_token_is_checked() {
        let svc = service();

        let update = svc.update(999, title_only("x"), None).await.unwrap_err();
        let delete = svc.delete(999, Some("forged-token")).await.unwrap_err();

        assert!(matches!(update, BoardError::NotFound));
        assert!(matches!(delete, BoardError::NotFound));
    }

    #[tokio::test]
    async fn update_with_invalid_token_is_rejected() {
        let svc = service();
        let created = svc
            .create(create_req("Hello", "World"), Some(&token_for("alice")))
            .await
            .unwrap();

        let err = svc
            .update(created.id(), title_only("x"), Some("forged-token"))
            .await
            .unwrap_err();

        assert!(matches!(err, BoardError::InvalidToken(_)));
        assert_eq!(svc.get(created.id()).await.unwrap().title(), "Hello");
    }
}
