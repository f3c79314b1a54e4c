//! Subcommand handlers for the `pixsecret` binary.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use tracing::info;

use pixsecret::client::{PlannedCall, PreviewClient};
use pixsecret::{ActionKind, ActionRequest, Coin, Dispatcher, Outcome, Permit, Settings};

/// Options accepted by `plan`
#[derive(Debug, Default, PartialEq)]
struct PlanOptions {
    config: Option<PathBuf>,
    sender: Option<String>,
    code: Option<String>,
    recognition: Option<String>,
    memo: Option<String>,
    market_value: Option<u128>,
    funds: Option<u128>,
    query: Option<serde_json::Value>,
    permit: Option<PathBuf>,
}

impl PlanOptions {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut opts = Self::default();
        let mut iter = args.iter();

        while let Some(flag) = iter.next() {
            let mut value = || {
                iter.next()
                    .cloned()
                    .ok_or_else(|| anyhow!("{flag} needs a value"))
            };
            match flag.as_str() {
                "--config" => opts.config = Some(PathBuf::from(value()?)),
                "--sender" => opts.sender = Some(value()?),
                "--code" => opts.code = Some(value()?),
                "--recognition" => opts.recognition = Some(value()?),
                "--memo" => opts.memo = Some(value()?),
                "--market-value" => {
                    let raw = value()?;
                    opts.market_value =
                        Some(raw.parse().with_context(|| format!("invalid market value {raw}"))?);
                }
                "--funds" => {
                    let raw = value()?;
                    opts.funds =
                        Some(raw.parse().with_context(|| format!("invalid amount {raw}"))?);
                }
                "--query" => {
                    let raw = value()?;
                    opts.query =
                        Some(serde_json::from_str(&raw).context("--query is not valid JSON")?);
                }
                "--permit" => opts.permit = Some(PathBuf::from(value()?)),
                other => bail!("unknown option {other}"),
            }
        }

        Ok(opts)
    }

    fn into_request(self, kind: ActionKind, settings: &Settings) -> anyhow::Result<ActionRequest> {
        let mut request = ActionRequest::new(&settings.contract());
        request.sender = self.sender;
        request.code = self.code;
        request.recognition = self.recognition;
        request.memo = self.memo;
        request.market_value = self.market_value;
        request.query = self.query;

        let funds = match (self.funds, kind) {
            (Some(amount), _) => Some(Coin::new(amount, settings.denom.clone())),
            (None, ActionKind::CreateCode) => Some(Coin::registration_fee()),
            (None, ActionKind::TryBuyCode) => self
                .market_value
                .map(|price| Coin::new(price, settings.denom.clone())),
            (None, _) => None,
        };
        if let Some(coin) = funds {
            request = request.funds(coin);
        }
        if let Some(path) = self.permit {
            request = request.permit(load_permit(&path)?);
        }
        Ok(request)
    }
}

fn load_permit(path: &Path) -> anyhow::Result<Permit> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read permit {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid permit {}", path.display()))
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let settings = match path {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => {
            let default = Settings::default_path();
            if default.exists() {
                Settings::load_from_file(&default)?
            } else {
                Settings::default()
            }
        }
    };
    Ok(settings.apply_env())
}

/// `pixsecret plan <action> [options]`
pub fn plan(args: &[String]) -> anyhow::Result<()> {
    let Some((tag, rest)) = args.split_first() else {
        bail!("usage: pixsecret plan <action> [options]");
    };

    let kind: ActionKind = tag.parse()?;
    let opts = PlanOptions::parse(rest)?;
    let settings = load_settings(opts.config.as_deref())?;
    settings.validate()?;
    let request = opts.into_request(kind, &settings)?;

    for call in preview(&request, kind, settings.gas_limit)? {
        println!("{}", serde_json::to_string_pretty(&call)?);
    }
    Ok(())
}

/// Dispatch against a [`PreviewClient`] and return the calls it captured
fn preview(
    request: &ActionRequest,
    kind: ActionKind,
    gas_limit: u64,
) -> anyhow::Result<Vec<PlannedCall>> {
    let client = PreviewClient::new();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(
        Dispatcher::new(&client)
            .with_gas_limit(gas_limit)
            .dispatch(request, kind),
    );

    if let Outcome::Failure(message) = outcome {
        bail!(message);
    }
    Ok(client.take())
}

/// `pixsecret config <init [path] | show>`
pub fn config(args: &[String]) -> anyhow::Result<()> {
    match args.first().map(String::as_str) {
        Some("init") => {
            let path = args
                .get(1)
                .map_or_else(Settings::default_path, PathBuf::from);
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            Settings::default().save_to_file(&path)?;
            info!(path = %path.display(), "wrote default settings");
            println!("Wrote {}", path.display());
            Ok(())
        }
        Some("show") => {
            let settings = load_settings(args.get(1).map(Path::new))?;
            print!("{}", toml::to_string_pretty(&settings)?);
            Ok(())
        }
        _ => bail!("usage: pixsecret config <init [path] | show [path]>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_options() {
        let opts = PlanOptions::parse(&args(&[
            "--sender",
            "secret1abc",
            "--code",
            "MYKEY",
            "--market-value",
            "2500",
            "--query",
            r#"{"code_exists":{"code":"MYKEY"}}"#,
        ]))
        .unwrap();

        assert_eq!(opts.sender.as_deref(), Some("secret1abc"));
        assert_eq!(opts.code.as_deref(), Some("MYKEY"));
        assert_eq!(opts.market_value, Some(2_500));
        assert_eq!(
            opts.query,
            Some(serde_json::json!({ "code_exists": { "code": "MYKEY" } }))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(PlanOptions::parse(&args(&["--code"])).is_err());
        assert!(PlanOptions::parse(&args(&["--market-value", "lots"])).is_err());
        assert!(PlanOptions::parse(&args(&["--colour", "red"])).is_err());
    }

    fn settings() -> Settings {
        Settings {
            contract_address: "secret1contract".to_string(),
            denom: "uscrt".to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_request_uses_settings() {
        let opts = PlanOptions::parse(&args(&["--code", "MYKEY", "--funds", "10"])).unwrap();
        let request = opts
            .into_request(ActionKind::SendFunds, &settings())
            .unwrap();

        assert_eq!(request.contract_address, "secret1contract");
        assert_eq!(request.code.as_deref(), Some("MYKEY"));
        assert_eq!(request.sent_funds, vec![Coin::uscrt(10)]);
    }

    #[test]
    fn test_create_code_attaches_registration_fee() {
        let opts = PlanOptions::parse(&args(&[
            "--sender",
            "secret1abc",
            "--code",
            "MYKEY",
            "--recognition",
            "Alice",
        ]))
        .unwrap();
        let request = opts
            .into_request(ActionKind::CreateCode, &settings())
            .unwrap();

        let calls = preview(&request, ActionKind::CreateCode, 100_000).unwrap();
        assert_eq!(calls.len(), 1);
        let PlannedCall::Execute(execute) = &calls[0] else {
            panic!("expected an execute call, got {:?}", calls[0]);
        };
        assert_eq!(execute.sent_funds, vec![Coin::registration_fee()]);
        assert_eq!(execute.sent_funds[0].to_string(), "5000000uscrt");
    }

    #[test]
    fn test_explicit_funds_override_fee() {
        let opts = PlanOptions::parse(&args(&["--funds", "7000000"])).unwrap();
        let request = opts
            .into_request(ActionKind::CreateCode, &settings())
            .unwrap();
        assert_eq!(request.sent_funds, vec![Coin::uscrt(7_000_000)]);
    }

    #[test]
    fn test_try_buy_pays_market_value() {
        let opts = PlanOptions::parse(&args(&["--market-value", "2500"])).unwrap();
        let request = opts
            .into_request(ActionKind::TryBuyCode, &settings())
            .unwrap();
        assert_eq!(request.sent_funds, vec![Coin::uscrt(2_500)]);

        let opts = PlanOptions::parse(&args(&["--code", "MYKEY"])).unwrap();
        let request = opts
            .into_request(ActionKind::SendFunds, &settings())
            .unwrap();
        assert!(request.sent_funds.is_empty());
    }
}
