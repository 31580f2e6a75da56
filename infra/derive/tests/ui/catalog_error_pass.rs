use catalog_derive::catalog_error;
use std::borrow::Cow;

#[catalog_error]
pub enum LoaderError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String, LoaderError> {
    Err(std::io::Error::other("disk gone")).context("reading appsettings.json")
}

fn main() {
    let err = read().unwrap_err();
    assert!(err.to_string().contains("(reading appsettings.json)"));

    let internal: LoaderError = "boom".into();
    assert!(matches!(internal, LoaderError::Internal { .. }));
}
