use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::client::{self, Handle};
use russh::keys::PrivateKeyWithHashAlg;
use russh_sftp::client::SftpSession;
use tokio::time::Instant;
use tracing::debug;

use super::classify;
use crate::args::ProbeMode;
use crate::auth::Credential;
use crate::campaign::Endpoint;
use crate::metrics::Outcome;

/// Result of one connect+authenticate cycle. `auth_ms` is the time from TCP
/// connect to completed authentication; it is only known when the attempt
/// got that far.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub outcome: Outcome,
    pub auth_ms: Option<u64>,
}

impl Probe {
    #[must_use]
    pub const fn failed(outcome: Outcome) -> Self {
        Self {
            outcome,
            auth_ms: None,
        }
    }
}

/// The transport seam between the campaign runner and the SSH stack.
/// Implementations classify every failure themselves; the runner only adds
/// the per-attempt deadline on top.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect_and_authenticate(&self) -> Probe;
}

/// Real connector backed by russh. Each call opens an independent
/// connection, authenticates with the resolved credential, runs the
/// configured probe, and tears the session down; nothing is shared between
/// attempts.
pub struct SshConnector {
    endpoint: Endpoint,
    credential: Credential,
    mode: ProbeMode,
    sftp_path: String,
    hold: Option<Duration>,
}

struct AcceptAnyHostKey;

impl client::Handler for AcceptAnyHostKey {
    type Error = russh::Error;

    // A load generator measures capacity, not server identity.
    async fn check_server_key(
        &mut self,
        _server_public_key: &russh::keys::ssh_key::PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

impl SshConnector {
    #[must_use]
    pub fn new(
        endpoint: Endpoint,
        credential: Credential,
        mode: ProbeMode,
        sftp_path: String,
        hold: Option<Duration>,
    ) -> Self {
        Self {
            endpoint,
            credential,
            mode,
            sftp_path,
            hold,
        }
    }

    async fn probe(&self) -> Probe {
        let start = Instant::now();
        let config = Arc::new(client::Config::default());

        let mut session = match client::connect(
            config,
            (self.endpoint.host.as_str(), self.endpoint.port),
            AcceptAnyHostKey,
        )
        .await
        {
            Ok(session) => session,
            Err(err) => {
                debug!("Connect to {} failed: {}", self.endpoint, err);
                return Probe::failed(classify::transport_error(&err));
            }
        };

        let authenticated = match self.authenticate(&mut session).await {
            Ok(result) => result,
            Err(err) => {
                debug!("Authentication against {} errored: {}", self.endpoint, err);
                return Probe::failed(classify::transport_error(&err));
            }
        };
        if !authenticated {
            return Probe::failed(Outcome::AuthFailure);
        }
        let auth_ms = elapsed_ms(start);

        let outcome = match self.mode {
            ProbeMode::Ssh => probe_session(&mut session).await,
            ProbeMode::Sftp => probe_sftp(&mut session, &self.sftp_path).await,
        };
        if outcome != Outcome::Success {
            return Probe {
                outcome,
                auth_ms: Some(auth_ms),
            };
        }

        if let Some(hold) = self.hold {
            tokio::time::sleep(hold).await;
        }
        drop(
            session
                .disconnect(russh::Disconnect::ByApplication, "", "English")
                .await,
        );

        Probe {
            outcome: Outcome::Success,
            auth_ms: Some(auth_ms),
        }
    }

    async fn authenticate(
        &self,
        session: &mut Handle<AcceptAnyHostKey>,
    ) -> Result<bool, russh::Error> {
        match &self.credential {
            Credential::Password { user, password } => {
                let result = session
                    .authenticate_password(user.as_str(), password.as_str())
                    .await?;
                Ok(result.success())
            }
            Credential::Key { user, key, .. } => {
                let hash_alg = session.best_supported_rsa_hash().await?.flatten();
                let result = session
                    .authenticate_publickey(
                        user.as_str(),
                        PrivateKeyWithHashAlg::new(key.clone(), hash_alg),
                    )
                    .await?;
                Ok(result.success())
            }
        }
    }
}

#[async_trait]
impl Connector for SshConnector {
    async fn connect_and_authenticate(&self) -> Probe {
        self.probe().await
    }
}

/// Post-auth probe for ssh mode: the server must still be able to open a
/// session channel.
async fn probe_session(session: &mut Handle<AcceptAnyHostKey>) -> Outcome {
    match session.channel_open_session().await {
        Ok(channel) => {
            drop(channel);
            Outcome::Success
        }
        Err(err) => classify::transport_error(&err),
    }
}

/// Post-auth probe for sftp mode: open the sftp subsystem and list the
/// configured directory, mirroring what a real client does right after
/// login.
async fn probe_sftp(session: &mut Handle<AcceptAnyHostKey>, path: &str) -> Outcome {
    let channel = match session.channel_open_session().await {
        Ok(channel) => channel,
        Err(err) => return classify::transport_error(&err),
    };
    if let Err(err) = channel.request_subsystem(true, "sftp").await {
        return classify::transport_error(&err);
    }
    let sftp = match SftpSession::new(channel.into_stream()).await {
        Ok(sftp) => sftp,
        Err(err) => {
            debug!("SFTP session setup failed: {}", err);
            return Outcome::ProtocolError;
        }
    };
    let outcome = match sftp.read_dir(path).await {
        Ok(_) => Outcome::Success,
        Err(err) => {
            debug!("SFTP listing of '{}' failed: {}", path, err);
            Outcome::ProtocolError
        }
    };
    drop(sftp.close().await);
    outcome
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
