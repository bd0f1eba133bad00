//! Share text for sending a payload through a chat app.

use crate::amount::Amount;
use crate::config::WHATSAPP_SHARE_BASE;

/// Chat message carrying the copy-and-paste code.
///
/// Uses WhatsApp's `*bold*` markup. When there is no amount the value line
/// says the payer chooses it.
pub fn share_message(beneficiary_name: &str, amount: Option<Amount>, payload: &str) -> String {
    let value = match amount.filter(Amount::is_positive) {
        Some(a) => a.to_brl(),
        None => "a definir".to_string(),
    };
    format!(
        "💰 *Pagamento PIX*\n\n*Para:* {}\n*Valor:* {}\n\n*PIX Copia e Cola:*\n{}",
        beneficiary_name, value, payload
    )
}

/// Click-to-chat link that opens WhatsApp with `message` pre-filled.
pub fn whatsapp_url(message: &str) -> String {
    format!("{}{}", WHATSAPP_SHARE_BASE, urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_with_amount() {
        let msg = share_message("JOHN DOE", Some(Amount::from_centavos(1050)), "000201...");
        assert!(msg.contains("*Para:* JOHN DOE"));
        assert!(msg.contains("*Valor:* R$ 10,50"));
        assert!(msg.ends_with("*PIX Copia e Cola:*\n000201..."));
    }

    #[test]
    fn test_message_without_amount() {
        let msg = share_message("JOHN DOE", Some(Amount::ZERO), "x");
        assert!(msg.contains("*Valor:* a definir"));
    }

    #[test]
    fn test_whatsapp_url_is_percent_encoded() {
        let url = whatsapp_url("a b\n*c*");
        assert_eq!(url, "https://wa.me/?text=a%20b%0A%2Ac%2A");
    }
}
