use crate::config::Config;
use crate::credential::{
    ConnectionConfig, ConnectionMap, ConnectionRegistry, TargetHandle, ValueSet,
};

/// Configured connections and which of them this run acts on.
#[derive(Debug, Clone, Default)]
pub struct Connections {
    available: ConnectionMap,
    active: Vec<String>,
    current: Option<TargetHandle>,
}

impl Connections {
    pub fn new(available: ConnectionMap, active: Vec<String>) -> Self {
        Self {
            available,
            active,
            current: None,
        }
    }

    /// Builds the registry from the deploy config and what previous runs stored.
    pub fn from_config<'a>(
        cfg: &Config,
        stored: impl IntoIterator<Item = (TargetHandle, &'a ValueSet)>,
    ) -> Self {
        let mut available: ConnectionMap = cfg
            .connections
            .iter()
            .map(|(name, entry)| {
                let servers = entry.servers.clone();
                (name.clone(), ConnectionConfig { servers })
            })
            .collect();

        for (handle, values) in stored {
            let TargetHandle::Connection { name, server } = handle else {
                continue;
            };
            let index = server.unwrap_or(0);
            match available.get_mut(&name) {
                Some(conn) => match conn.servers.get_mut(index) {
                    Some(known) => known.overlay(values),
                    None => log::warn!(
                        "Ignoring stored values for [{name}#{index}]: no such server in the config"
                    ),
                },
                // Only a single-server connection can be carried over from storage alone.
                None if index == 0 => {
                    let mut known = ValueSet::new();
                    known.overlay(values);
                    available.insert(name, ConnectionConfig { servers: vec![known] });
                }
                None => log::warn!(
                    "Ignoring stored values for [{name}#{index}]: connection is not in the config"
                ),
            }
        }

        Self::new(available, cfg.default.clone())
    }

    /// Handle most recently resolved.
    pub fn current(&self) -> Option<&TargetHandle> {
        self.current.as_ref()
    }
}

impl ConnectionRegistry for Connections {
    fn available_connections(&self) -> ConnectionMap {
        self.available.clone()
    }

    fn connections(&self) -> Vec<String> {
        self.active.clone()
    }

    fn set_connections(&mut self, names: Vec<String>) {
        self.active = names;
    }

    fn set_connection(&mut self, handle: &TargetHandle) {
        self.current = Some(handle.clone());
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::credential::{CredValue, FieldKind};

    const TOML: &str = r#"
        default = ["production"]

        [[connections.production.servers]]
        host = "{host}"
        username = "deploy"

        [[connections.production.servers]]
        host = "web2.example.com"
    "#;

    #[test]
    fn stored_values_fill_configured_servers() {
        let cfg = Config::from_toml(TOML).unwrap();
        let stored: ValueSet = [(FieldKind::Host, CredValue::text("web1.example.com"))]
            .into_iter()
            .collect();

        let conns = Connections::from_config(
            &cfg,
            [(TargetHandle::connection("production", Some(0)), &stored)],
        );
        let available = conns.available_connections();
        let servers = &available["production"].servers;

        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].get_text(FieldKind::Host), Some("web1.example.com"));
        assert_eq!(servers[0].get_text(FieldKind::Username), Some("deploy"));
        assert_eq!(servers[1].get_text(FieldKind::Host), Some("web2.example.com"));
        assert_eq!(conns.connections(), ["production"]);
    }

    #[test]
    fn stored_connection_missing_from_config_is_added() {
        let cfg = Config::default();
        let stored: ValueSet = [(FieldKind::Host, CredValue::text("staging.example.com"))]
            .into_iter()
            .collect();

        let conns =
            Connections::from_config(&cfg, [(TargetHandle::connection("staging", None), &stored)]);
        let available = conns.available_connections();
        assert_eq!(available["staging"].servers, [stored.clone()]);
        assert!(conns.connections().is_empty());
    }

    #[test]
    fn stored_server_removed_from_config_is_not_revived() {
        let cfg = Config::from_toml(
            r#"
            default = ["production"]

            [[connections.production.servers]]
            host = "web1.example.com"
            "#,
        )
        .unwrap();
        let stored: ValueSet = [(FieldKind::Host, CredValue::text("web2.example.com"))]
            .into_iter()
            .collect();

        let conns = Connections::from_config(
            &cfg,
            [(TargetHandle::connection("production", Some(1)), &stored)],
        );
        let available = conns.available_connections();
        let servers = &available["production"].servers;
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].get_text(FieldKind::Host), Some("web1.example.com"));
    }

    #[test]
    fn out_of_range_stored_index_is_skipped() {
        let cfg = Config::from_toml(TOML).unwrap();
        let stored: ValueSet = [(FieldKind::Host, CredValue::text("web9.example.com"))]
            .into_iter()
            .collect();
        let huge: TargetHandle = "production#18446744073709551615".parse().unwrap();
        let far: TargetHandle = "production#1000000000".parse().unwrap();

        let conns = Connections::from_config(&cfg, [(huge, &stored), (far, &stored)]);
        let available = conns.available_connections();
        assert_eq!(available["production"].servers.len(), 2);
    }

    #[test]
    fn stored_extra_server_of_unknown_connection_is_skipped() {
        let cfg = Config::default();
        let stored: ValueSet = [(FieldKind::Host, CredValue::text("staging.example.com"))]
            .into_iter()
            .collect();

        let conns = Connections::from_config(
            &cfg,
            [(TargetHandle::connection("staging", Some(3)), &stored)],
        );
        assert!(conns.available_connections().is_empty());

        let conns = Connections::from_config(
            &cfg,
            [
                (TargetHandle::connection("staging", Some(0)), &stored),
                (TargetHandle::connection("staging", Some(1)), &stored),
            ],
        );
        assert_eq!(conns.available_connections()["staging"].servers, [stored.clone()]);
    }

    #[test]
    fn set_connection_records_the_last_handle() {
        let mut conns = Connections::default();
        assert_eq!(conns.current(), None);

        conns.set_connections(vec!["staging".to_owned()]);
        conns.set_connection(&TargetHandle::connection("staging", None));
        assert_eq!(conns.connections(), ["staging"]);
        assert_eq!(
            conns.current(),
            Some(&TargetHandle::connection("staging", None))
        );
    }
}
