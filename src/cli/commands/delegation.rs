use crate::adapters::parsers::pem_certificate::PemCertificateParser;
use crate::adapters::transport::http_transport::HttpTransport;
use crate::adapters::trust_store::file_trust_store::FileTrustStore;
use crate::cli::DelegationAction;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::delegation_role::DelegationRole;
use crate::core::services::delegation_service::DelegationService;
use crate::core::services::request_validator::RequestValidator;

/// Policy: new delegations are staged with a single-key threshold.
/// The service accepts any threshold >= 1; only this constant changes
/// once multi-key quorums are staged.
const SIGNING_THRESHOLD: u32 = 1;

/// Execute a `trustctl delegation` subcommand.
pub fn execute(action: &DelegationAction, config: &AppConfig) -> Result<()> {
    let parser = PemCertificateParser;
    let validator = RequestValidator::new(&parser);
    let service = DelegationService {
        opener: FileTrustStore,
    };

    match action {
        DelegationAction::List { args } => {
            let request = validator.validate_list(args)?;
            let transport = HttpTransport::new(&config.remote_server);
            let roles = service.list(&config.trust_dir, &request.gun, &transport)?;

            println!();
            if roles.is_empty() {
                output::warning(&format!(
                    "No delegations present in \"{}\".",
                    request.gun
                ));
            } else {
                print!("{}", format_roles(&roles));
            }
            println!();
        }

        DelegationAction::Remove { args } => {
            let request = validator.validate_remove(args)?;
            service.remove(&config.trust_dir, &request.gun, &request.role)?;

            println!();
            output::success(&format!(
                "Removal of delegation of key \"{}\" to role {}, to collection \"{}\" \
                 staged for next publish.",
                request.key_id, request.role, request.gun
            ));
            println!();
        }

        DelegationAction::Add { args } => {
            let request = validator.validate_add(args, SIGNING_THRESHOLD, chrono::Utc::now())?;
            service.add(
                &config.trust_dir,
                &request.gun,
                &request.role,
                request.threshold,
                std::slice::from_ref(&request.certificate),
                &request.paths,
            )?;

            println!();
            output::success(&format!(
                "Addition of delegation of key \"{}\" to role {} with paths {:?}, \
                 to collection \"{}\" staged for next publish.",
                request.key_id, request.role, request.paths, request.gun
            ));
            println!();
        }
    }

    Ok(())
}

/// Render roles as an aligned table: name, key IDs, paths, threshold.
/// Order is whatever the collaborator returned.
fn format_roles(roles: &[DelegationRole]) -> String {
    let name_width = roles
        .iter()
        .map(|r| r.name.len())
        .chain(std::iter::once("ROLE".len()))
        .max()
        .unwrap_or(0);

    let mut out = format!("{:name_width$}  {:64}  {:24}  THRESHOLD\n", "ROLE", "KEY IDS", "PATHS");
    for role in roles {
        let key_ids = join_or_dash(&role.key_ids);
        let paths = join_or_dash(&role.paths);
        out.push_str(&format!(
            "{:name_width$}  {:64}  {:24}  {}\n",
            role.name, key_ids, paths, role.threshold
        ));
    }
    out
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(",")
    }
}
