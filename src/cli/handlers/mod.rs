use std::path::PathBuf;
use std::time::Duration;

use crate::api::Backend;
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::combo::FieldValue;
use crate::form::{AddItemForm, EditItemForm, FieldErrors, SubmitError};
use crate::io::config_io::{self, LoadedConfig};

/// Demo lookups answer instantly on the CLI
const CLI_DEMO_LATENCY: Duration = Duration::ZERO;

// ---------------------------------------------------------------------------
// Shared setup
// ---------------------------------------------------------------------------

/// Resolve the config from `--config` or by discovery from the cwd
pub fn load_config(
    cli_config: Option<&str>,
) -> Result<LoadedConfig, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let explicit = cli_config.map(PathBuf::from);
    Ok(config_io::load_config(explicit.as_deref(), &cwd)?)
}

/// Demo catalog or the configured REST API
pub fn backend(
    loaded: &LoadedConfig,
    demo: bool,
    demo_latency: Duration,
) -> Result<Backend, Box<dyn std::error::Error>> {
    if demo {
        Ok(Backend::demo(demo_latency))
    } else {
        Ok(Backend::http(&loaded.config.api)?)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let loaded = load_config(cli.config.as_deref())?;

    let Some(cmd) = cli.command else {
        return Err("no command given (run `stock` without arguments for the form)".into());
    };
    match cmd {
        Commands::Config => cmd_config(&loaded, json),
        Commands::Suppliers(args) => {
            let backend = backend(&loaded, cli.demo, CLI_DEMO_LATENCY)?;
            cmd_suppliers(&backend, args, json)
        }
        Commands::Products(args) => {
            let backend = backend(&loaded, cli.demo, CLI_DEMO_LATENCY)?;
            cmd_products(&backend, args, json)
        }
        Commands::Items(args) => {
            let backend = backend(&loaded, cli.demo, CLI_DEMO_LATENCY)?;
            cmd_items(&backend, args, json)
        }
        Commands::Add(args) => {
            let backend = backend(&loaded, cli.demo, CLI_DEMO_LATENCY)?;
            cmd_add(&backend, args, json)
        }
        Commands::Edit(args) => {
            let backend = backend(&loaded, cli.demo, CLI_DEMO_LATENCY)?;
            cmd_edit(&backend, args, json)
        }
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_suppliers(
    backend: &Backend,
    args: LookupArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let suppliers = backend.suppliers.fetch(args.query.as_deref())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&suppliers)?);
    } else {
        print!("{}", format_suppliers(&suppliers));
    }
    Ok(())
}

fn cmd_products(
    backend: &Backend,
    args: LookupArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let products = backend.products.fetch(args.query.as_deref())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
    } else {
        print!("{}", format_products(&products));
    }
    Ok(())
}

fn cmd_items(
    backend: &Backend,
    args: LookupArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = backend.items.fetch(args.query.as_deref())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print!("{}", format_items(&items));
    }
    Ok(())
}

fn cmd_config(loaded: &LoadedConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&loaded.config)?);
        return Ok(());
    }
    match &loaded.path {
        Some(path) => println!("# {}", path.display()),
        None => println!("# built-in defaults (no {} found)", config_io::CONFIG_FILE),
    }
    print!("{}", toml::to_string_pretty(&loaded.config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn form_from_args(args: AddArgs) -> AddItemForm {
    let text = |v: Option<String>| FieldValue::new(v.unwrap_or_default());
    AddItemForm {
        name: text(args.name),
        quantity: text(args.quantity),
        price: text(args.price),
        currency: args.currency,
        supplier: text(args.supplier),
        serial_numbers: text(args.serials),
    }
}

/// Print field errors in the chosen output mode, then fail with them
fn report_field_errors(errors: FieldErrors, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&ErrorsJson { errors: &errors })?);
    } else {
        eprint!("{}", format_field_errors(&errors));
    }
    Err(SubmitError::Invalid(errors).into())
}

fn cmd_add(
    backend: &Backend,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut form = form_from_args(args);
    match form.submit(backend.store.as_ref()) {
        Ok(item) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&AddedJson { stored: &item })?);
            } else {
                print!("{}", format_added(&item));
            }
            Ok(())
        }
        Err(SubmitError::Invalid(errors)) => report_field_errors(errors, json),
        Err(e) => Err(e.into()),
    }
}

/// Overlay the given flags on the stored item's values
fn apply_edit_args(form: &mut EditItemForm, args: EditArgs) {
    if let Some(name) = args.name {
        form.name = FieldValue::new(name);
    }
    if let Some(price) = args.price {
        form.price = FieldValue::new(price);
    }
    if let Some(currency) = args.currency {
        form.currency = Some(currency);
    }
    if let Some(supplier) = args.supplier {
        form.supplier = FieldValue::new(supplier);
    }
    if let Some(status) = args.status {
        form.status = Some(status);
    }
    if let Some(serial) = args.serial {
        form.serial_number = FieldValue::new(serial);
    }
}

fn cmd_edit(
    backend: &Backend,
    args: EditArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let item = backend.store.get_item(args.id)?;
    let mut form = EditItemForm::from_item(&item);
    apply_edit_args(&mut form, args);
    match form.submit(backend.store.as_ref()) {
        Ok(update) => {
            if json {
                let out = UpdatedJson {
                    id: form.id,
                    updated: &update,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", format_updated(form.id, &update));
            }
            Ok(())
        }
        Err(SubmitError::Invalid(errors)) => report_field_errors(errors, json),
        Err(e) => Err(e.into()),
    }
}
