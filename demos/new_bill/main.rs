//! NewBill walkthrough against the in-memory store
//!
//! This example demonstrates:
//! - Loading the form configuration from YAML
//! - A refused receipt and an accepted one
//! - Constraint validation on the empty form, then a submit
//! - Listening to the diagnostic channel
//!
//! Run with `RUST_LOG=newbill=debug cargo run --example new_bill`.

use newbill::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("newbill=info")),
        )
        .init();

    println!("🧾 NewBill Example");
    println!("==================\n");

    let config = FormConfig::from_yaml_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/demos/new_bill/form.yaml"
    ))?;
    println!("✅ Accepting receipts: {}\n", config.accepted_extensions.join(", "));

    let store = Arc::new(InMemoryBillStore::with_base_url("https://localhost:3456/images"));
    let navigator = Arc::new(HistoryNavigator::default());
    let session = Session::from_json(r#"{"type":"Employee","email":"employee@test.tld"}"#)?;
    let controller = NewBillController::new(store.clone(), navigator.clone(), session, config)?;

    let mut diagnostics = controller.subscribe();
    let listener = tokio::spawn(async move {
        while let Ok(envelope) = diagnostics.recv().await {
            match envelope.event.error_message() {
                Some(message) => println!("   ⚠️  {}: {}", envelope.event.action(), message),
                None => println!("   📣 {}", envelope.event.action()),
            }
        }
    });

    println!("📎 Selecting facture.pdf");
    let refused = Attachment::from_input_path(
        r"C:\fakepath\facture.pdf",
        "application/pdf",
        b"%PDF".to_vec(),
    );
    controller.handle_file_change(Some(refused)).await;

    println!("📎 Selecting facture.png");
    let receipt = Attachment::from_input_path(
        r"C:\fakepath\facture.png",
        "image/png",
        b"\x89PNG".to_vec(),
    );
    controller.handle_file_change(Some(receipt)).await;

    println!("🔎 Checking the empty form");
    if let Err(err) = controller.form().await.check_validity() {
        println!("   ❌ {}", err);
    }

    controller.change_field(FieldId::ExpenseType, "Transports").await?;
    controller.change_field(FieldId::ExpenseName, "Vol Paris Londres").await?;
    controller.change_field(FieldId::Date, "2022-02-02").await?;
    controller.change_field(FieldId::Amount, "348").await?;
    controller.change_field(FieldId::Vat, "70").await?;
    controller.change_field(FieldId::Commentary, "Séminaire à Londres").await?;

    println!("📨 Submitting the filled form");
    let outcome = controller.click_submit().await;
    println!("   ➡️  {:?}", outcome);
    println!("   📍 {}\n", navigator.location());

    for bill in store.list().await {
        println!("{}", serde_json::to_string_pretty(&bill)?);
    }

    drop(controller);
    listener.await?;
    Ok(())
}
