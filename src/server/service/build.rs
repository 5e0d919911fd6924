use crate::server::{
    data::remote::{create_or_update, RemoteStore},
    error::{remote::RemoteError, AppError},
};

/// Uploads of tool builds to the repository.
pub struct BuildService<'a> {
    remote: Option<&'a dyn RemoteStore>,
    build_dir: &'a str,
}

impl<'a> BuildService<'a> {
    pub fn new(remote: Option<&'a dyn RemoteStore>, build_dir: &'a str) -> Self {
        Self { remote, build_dir }
    }

    /// Stores a build file under the build directory.
    ///
    /// Only the final path segment of `file_name` is kept.
    ///
    /// # Returns
    /// - `Ok(String)` - Repository path the build was stored at
    /// - `Err(AppError::InternalError)` - File name is empty
    /// - `Err(AppError::RemoteErr)` - Remote storage disabled or unreachable
    pub async fn upload(&self, file_name: &str, content: &[u8]) -> Result<String, AppError> {
        let remote = self.remote.ok_or(RemoteError::Disabled)?;
        let path = build_path(self.build_dir, file_name)
            .ok_or_else(|| AppError::InternalError(format!("Invalid build name '{}'", file_name)))?;

        let written = create_or_update(
            remote,
            &path,
            content,
            &format!("Upload build {}", file_name.trim()),
        )
        .await?;

        if written {
            tracing::info!("Uploaded build {} ({} bytes)", path, content.len());
        }
        Ok(path)
    }
}

/// Repository path for a build, or `None` when the name has no usable segment.
fn build_path(build_dir: &str, file_name: &str) -> Option<String> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")?;

    let dir = build_dir.trim_matches('/');
    Some(if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    })
}
