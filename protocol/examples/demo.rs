//! Walks through the payload lifecycle: resolve settings from a profile row,
//! validate, encode, verify, and build the share link.
//!
//! Run with:
//!   cargo run -p pix-protocol --example demo

use pix_protocol::amount::Amount;
use pix_protocol::payload::{decode_payload, encode, AmountPolicy};
use pix_protocol::profile::{PixSettings, ProfilePixRecord, StoredPixConfig};
use pix_protocol::share::{share_message, whatsapp_url};

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

fn step(n: u32, title: &str) {
    println!("\n{BOLD}[{n}] {title}{RESET}");
}

fn main() {
    step(1, "Profile row");
    let record = ProfilePixRecord {
        name: Some("Maria Aparecida dos Santos Oliveira".into()),
        pix_enabled: Some(true),
        pix_key: Some("123.456.789-01".into()),
        pix_type: Some("cpf".into()),
        pix: Some(StoredPixConfig {
            city: Some("Sao Jose dos Campos".into()),
            ..Default::default()
        }),
    };
    println!("{DIM}{:?}{RESET}", record);

    step(2, "Resolved settings");
    let settings = match PixSettings::from_profile(&record) {
        Ok(s) => s,
        Err(e) => {
            println!("{RED}cannot resolve settings: {e}{RESET}");
            return;
        }
    };
    println!("  type: {}  key: {}", settings.key_type, settings.key);
    println!("  name: {}  city: {}", settings.beneficiary_name, settings.city);

    step(3, "Open-amount payload");
    let open = settings.to_target(None);
    match encode(&open, AmountPolicy::Open) {
        Ok(p) => println!("  {GREEN}{p}{RESET}"),
        Err(e) => println!("  {RED}{e}{RESET}"),
    }

    step(4, "Checkout payload without an amount");
    if let Err(e) = encode(&open, AmountPolicy::Required) {
        println!("  {RED}refused: {e}{RESET}");
    }

    step(5, "Fixed-amount payload");
    let amount = Amount::from_masked_input("R$ 42,90");
    let target = settings.to_target(amount);
    let payload = match encode(&target, AmountPolicy::Required) {
        Ok(p) => p,
        Err(e) => {
            println!("  {RED}{e}{RESET}");
            return;
        }
    };
    println!("  {GREEN}{payload}{RESET}");

    step(6, "Decoded back");
    match decode_payload(&payload) {
        Ok(d) => {
            println!("  key:    {}", d.recipient_key);
            println!("  name:   {}", d.beneficiary_name);
            println!("  city:   {}", d.city);
            println!(
                "  amount: {}",
                d.amount.map(|a| a.to_brl()).unwrap_or_default()
            );
            println!("  crc:    {}", d.checksum);
        }
        Err(e) => println!("  {RED}{e}{RESET}"),
    }

    step(7, "Share link");
    let message = share_message(&settings.beneficiary_name, amount, &payload);
    println!("  {}", whatsapp_url(&message));
}
