pub type MipsvgResult<T> = Result<T, MipsvgError>;

#[derive(thiserror::Error, Debug)]
pub enum MipsvgError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("raster error: {0}")]
    Raster(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MipsvgError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }
}
