//! Upload service - Image uploads into the static upload directory.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

use super::AuthService;
use crate::config::ALLOWED_IMAGE_EXTENSIONS;
use crate::domain::{Session, StoredFile};
use crate::errors::{AppResult, ValidationError};
use crate::infra::UploadDir;

static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("valid filename pattern"));

/// Reduce a client supplied name to a safe bare filename.
///
/// Accented letters fold to their ASCII base (NFKD, marks dropped). Path
/// separators become spaces, whitespace runs become `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped and leading or trailing `.`/`_` are trimmed.
/// The result may be empty.
pub fn sanitize_filename(name: &str) -> String {
    let folded: String = name.nfkd().filter(char::is_ascii).collect();
    let flattened = folded.replace(['/', '\\'], " ");
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");
    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// True when the text after the last `.` is an allowed image extension,
/// compared case-insensitively.
pub fn has_allowed_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
        None => false,
    }
}

/// Image upload operations for the admin area.
#[async_trait]
pub trait UploadService: Send + Sync {
    /// Validate and store an uploaded file under its sanitized name.
    ///
    /// A file with the same sanitized name is overwritten.
    async fn upload(&self, session: &Session, filename: &str, bytes: &[u8])
        -> AppResult<StoredFile>;

    /// Filenames currently in the upload directory
    async fn list_uploaded(&self, session: &Session) -> AppResult<Vec<String>>;
}

/// Concrete implementation of UploadService over a local directory.
pub struct Uploads {
    dir: UploadDir,
    max_bytes: usize,
    auth: Arc<dyn AuthService>,
}

impl Uploads {
    pub fn new(dir: UploadDir, max_bytes: usize, auth: Arc<dyn AuthService>) -> Self {
        Self {
            dir,
            max_bytes,
            auth,
        }
    }
}

#[async_trait]
impl UploadService for Uploads {
    async fn upload(
        &self,
        session: &Session,
        filename: &str,
        bytes: &[u8],
    ) -> AppResult<StoredFile> {
        let user = self.auth.require_authenticated(session).await?;

        if filename.is_empty() {
            return Err(ValidationError::NoFile.into());
        }
        if bytes.len() > self.max_bytes {
            return Err(ValidationError::FileTooLarge.into());
        }
        if !has_allowed_extension(filename) {
            return Err(ValidationError::DisallowedType.into());
        }

        let safe_name = sanitize_filename(filename);
        if !has_allowed_extension(&safe_name) {
            return Err(ValidationError::DisallowedType.into());
        }

        self.dir.write(&safe_name, bytes).await?;
        tracing::info!(filename = %safe_name, size = bytes.len(), user_id = user.id, "Image uploaded");

        Ok(StoredFile {
            filename: safe_name,
            size: bytes.len(),
        })
    }

    async fn list_uploaded(&self, session: &Session) -> AppResult<Vec<String>> {
        self.auth.require_authenticated(session).await?;
        self.dir.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::{Password, User};
    use crate::errors::AppError;
    use crate::infra::repositories::MockUserRepository;
    use crate::services::test_support::TestUnitOfWork;
    use crate::services::Authenticator;

    fn uploads(root: &std::path::Path, max_bytes: usize) -> Uploads {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|id| {
            Ok((id == 1).then(|| User {
                id: 1,
                username: "admin".to_string(),
                password_hash: Password::from_hash("unused".to_string()).into_string(),
            }))
        });
        let auth = Arc::new(Authenticator::new(
            Arc::new(TestUnitOfWork::default().with_users(users)),
            Config::new("sqlite::memory:", "test-secret-key-for-testing-only-32chars").unwrap(),
        ));
        Uploads::new(UploadDir::new(root), max_bytes, auth)
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("bolo.png"), "bolo.png");
        assert_eq!(sanitize_filename("My Cake.PNG"), "My_Cake.PNG");
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("..\\..\\win.jpg"), "win.jpg");
        assert_eq!(sanitize_filename("bolo de   fubá.jpg"), "bolo_de_fuba.jpg");
        assert_eq!(sanitize_filename("Coração_Açúcar.PNG"), "Coracao_Acucar.PNG");
        assert_eq!(sanitize_filename("蛋糕.png"), "png");
        assert_eq!(sanitize_filename("..."), "");
    }

    #[test]
    fn test_has_allowed_extension() {
        assert!(has_allowed_extension("a.png"));
        assert!(has_allowed_extension("a.JPEG"));
        assert!(has_allowed_extension("a.tar.gif"));
        assert!(!has_allowed_extension("a.exe"));
        assert!(!has_allowed_extension("png"));
        assert!(!has_allowed_extension("a.png.exe"));
    }

    #[tokio::test]
    async fn test_upload_stores_sanitized_name() {
        let tmp = tempfile::tempdir().unwrap();
        let service = uploads(tmp.path(), 1024);
        let session = Session::for_user(1);

        let stored = service.upload(&session, "../Bolo Novo.jpg", b"jpeg").await.unwrap();

        assert_eq!(stored.filename, "Bolo_Novo.jpg");
        assert_eq!(stored.size, 4);
        assert!(tmp.path().join("Bolo_Novo.jpg").exists());
        assert_eq!(
            service.list_uploaded(&session).await.unwrap(),
            vec!["Bolo_Novo.jpg".to_string()]
        );
    }

    #[tokio::test]
    async fn test_upload_rejections() {
        let tmp = tempfile::tempdir().unwrap();
        let service = uploads(tmp.path(), 4);
        let session = Session::for_user(1);

        let cases: [(&str, &[u8], ValidationError); 3] = [
            ("", b"x", ValidationError::NoFile),
            ("big.png", b"12345", ValidationError::FileTooLarge),
            ("virus.exe", b"x", ValidationError::DisallowedType),
        ];
        for (name, bytes, expected) in cases {
            match service.upload(&session, name, bytes).await {
                Err(AppError::Validation(e)) => assert_eq!(e, expected, "{name}"),
                other => panic!("{name}: unexpected {other:?}"),
            }
        }

        assert!(service.list_uploaded(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_requires_login() {
        let tmp = tempfile::tempdir().unwrap();
        let service = uploads(tmp.path(), 1024);

        let result = service.upload(&Session::anonymous(), "a.png", b"png").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
        assert!(!tmp.path().join("a.png").exists());
    }
}
