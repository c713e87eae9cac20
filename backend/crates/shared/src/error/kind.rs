//! Error Kind
//!
//! The closed set of outcomes an [`AppError`](super::app_error::AppError)
//! can report, each pinned to one HTTP status.

use std::fmt;

/// エラー種別
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Conflict.status_code(), 409);
/// assert_eq!(ErrorKind::Internal.to_string(), "Internal Server Error");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 入力が不正（検証エラー、パスワード不一致を含む）
    BadRequest,
    /// 認証情報がない
    Unauthorized,
    /// 認証情報が無効
    Forbidden,
    /// 対象が存在しない
    NotFound,
    /// 一意制約違反
    Conflict,
    /// サーバー内部エラー
    Internal,
}

impl ErrorKind {
    /// (status, reason phrase)
    const fn parts(self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::Unauthorized => (401, "Unauthorized"),
            ErrorKind::Forbidden => (403, "Forbidden"),
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::Internal => (500, "Internal Server Error"),
        }
    }

    /// HTTP ステータスコード
    #[inline]
    pub const fn status_code(self) -> u16 {
        self.parts().0
    }

    /// 理由フレーズ（5xx ではレスポンス本文のメッセージにも使う）
    #[inline]
    pub const fn as_str(self) -> &'static str {
        self.parts().1
    }

    /// 5xx はログに詳細を残し、本文には出さない
    #[inline]
    pub const fn is_server_error(self) -> bool {
        self.status_code() >= 500
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
