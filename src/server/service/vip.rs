use crate::server::{
    data::remote::RemoteStore,
    error::{remote::RemoteError, AppError},
    model::friend_code::FriendCode,
};

/// Maintenance of the remote VIP friend-code list.
pub struct VipService<'a> {
    remote: Option<&'a dyn RemoteStore>,
    path: &'a str,
}

impl<'a> VipService<'a> {
    pub fn new(remote: Option<&'a dyn RemoteStore>, path: &'a str) -> Self {
        Self { remote, path }
    }

    /// Removes every line holding `code` from the VIP file.
    ///
    /// # Returns
    /// - `Ok(true)` - The code was listed and the file was rewritten
    /// - `Ok(false)` - The code was not listed, or the file does not exist
    /// - `Err(AppError::RegistryErr)` - Malformed code
    /// - `Err(AppError::RemoteErr)` - Remote storage disabled or unreachable
    pub async fn remove_vip(&self, code: &str) -> Result<bool, AppError> {
        let code = FriendCode::parse(code.trim())?;
        let remote = self.remote.ok_or(RemoteError::Disabled)?;

        let Some(file) = remote.fetch(self.path).await? else {
            return Ok(false);
        };

        let text = file.text();
        let kept: Vec<&str> = text
            .lines()
            .filter(|line| line.trim() != code.as_str())
            .collect();

        if kept.len() == text.lines().count() {
            return Ok(false);
        }

        remote
            .store(
                self.path,
                kept.join("\n").as_bytes(),
                &format!("Remove VIP {} [skip ci]", code),
                Some(file.revision.as_str()),
            )
            .await?;

        tracing::info!("Removed {} from VIP list", code);
        Ok(true)
    }
}
