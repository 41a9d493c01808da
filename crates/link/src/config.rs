use {
    agora_apps::App,
    agora_common::{Error, Result},
    agora_platform::SiteConfig,
    secrecy::Secret,
    url::Url,
};

/// OAuth2 provider configuration for linking users to one app, assembled
/// from the app's stored client credentials and the platform's own
/// authorize/token endpoints.
#[derive(Debug, Clone)]
pub struct OAuthAppConfig {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub authorize_url: String,
    pub token_url: String,
}

impl OAuthAppConfig {
    /// Fails `Validation` when the app carries no usable client credentials
    /// or the platform has no parsable site URL.
    pub fn for_app(app: &App, config: &SiteConfig) -> Result<Self> {
        let app_id = &app.manifest.app_id;
        if app.manifest.oauth2_client_id.is_empty() {
            return Err(Error::validation(format!(
                "app {app_id} has no OAuth2 client id"
            )));
        }
        let Some(client_secret) = app.manifest.oauth2_client_secret.clone() else {
            return Err(Error::validation(format!(
                "app {app_id} has no OAuth2 client secret"
            )));
        };

        Url::parse(&config.site_url)
            .map_err(|e| Error::validation(format!("invalid site url {}: {e}", config.site_url)))?;
        let base = config.site_url.trim_end_matches('/');

        Ok(Self {
            client_id: app.manifest.oauth2_client_id.clone(),
            client_secret,
            authorize_url: format!("{base}/oauth/authorize"),
            token_url: format!("{base}/oauth/access_token"),
        })
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        agora_apps::{AppId, Manifest},
    };

    fn linked_app() -> App {
        App {
            manifest: Manifest {
                app_id: AppId::from("acme"),
                oauth2_client_id: "client".into(),
                oauth2_client_secret: Some(Secret::new("cs".into())),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn site() -> SiteConfig {
        SiteConfig {
            site_url: "https://agora.example.com/".into(),
        }
    }

    #[test]
    fn builds_platform_endpoints_from_the_site_url() {
        let config = OAuthAppConfig::for_app(&linked_app(), &site()).unwrap();
        assert_eq!(
            config.authorize_url,
            "https://agora.example.com/oauth/authorize"
        );
        assert_eq!(
            config.token_url,
            "https://agora.example.com/oauth/access_token"
        );
    }

    #[test]
    fn missing_credentials_fail_validation() {
        let mut app = linked_app();
        app.manifest.oauth2_client_secret = None;
        let err = OAuthAppConfig::for_app(&app, &site()).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        let mut app = linked_app();
        app.manifest.oauth2_client_id.clear();
        let err = OAuthAppConfig::for_app(&app, &site()).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn unparsable_site_url_fails_validation() {
        let config = SiteConfig {
            site_url: "not a url".into(),
        };
        let err = OAuthAppConfig::for_app(&linked_app(), &config).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
