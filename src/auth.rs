use google_sheets4::oauth2::{
    self, authenticator::Authenticator, authenticator_delegate::InstalledFlowDelegate,
    InstalledFlowAuthenticator, InstalledFlowReturnMethod,
};
use google_sheets4::Sheets;
use google_sheets4::{hyper, hyper_rustls};
use log::info;

use crate::config::Config;
use crate::error::Result;

// If modifying this scope, delete the previously saved token file.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

pub type Connector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;

/// Authenticated Google Sheets client.
pub type Hub = Sheets<Connector>;

/// HTTPS-only client trusting the platform's root certificates.
pub fn https_client() -> hyper::Client<Connector> {
    hyper::Client::builder().build(
        hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .https_only()
            .enable_http1()
            .build(),
    )
}

/// Redirects the consent page to the first redirect URI registered in the
/// credentials file. The user still pastes the code shown there on stdin.
struct PasteCodeDelegate {
    redirect_uri: Option<String>,
}

impl PasteCodeDelegate {
    fn new(secret: &oauth2::ApplicationSecret) -> PasteCodeDelegate {
        PasteCodeDelegate {
            redirect_uri: secret.redirect_uris.first().cloned(),
        }
    }
}

impl InstalledFlowDelegate for PasteCodeDelegate {
    fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }
}

/// Builds an installed-app authenticator for the client `secret`.
///
/// Tokens are cached in `config.token_file`. When the cache is empty the user
/// is shown a consent URL and asked to paste the authorization code on stdin;
/// afterwards the cached refresh token is used. A token is requested up front so
/// that this exchange happens here rather than in the middle of a later call.
pub async fn auth(
    config: &Config,
    secret: oauth2::ApplicationSecret,
    client: hyper::Client<Connector>,
) -> Result<Authenticator<Connector>> {
    let delegate = PasteCodeDelegate::new(&secret);
    let authenticator =
        InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::Interactive)
            .flow_delegate(Box::new(delegate))
            .hyper_client(client)
            .persist_tokens_to_disk(&config.token_file)
            .build()
            .await?;

    authenticator.token(&[SPREADSHEETS_SCOPE]).await?;
    info!("Authorized, token cached in {}", config.token_file.display());

    Ok(authenticator)
}

/// Reads the credentials file and returns an authenticated [`Hub`].
pub async fn hub(config: &Config) -> Result<Hub> {
    let secret = oauth2::read_application_secret(&config.credentials_file).await?;
    let client = https_client();
    let authenticator = auth(config, secret, client.clone()).await?;
    Ok(Sheets::new(client, authenticator))
}
