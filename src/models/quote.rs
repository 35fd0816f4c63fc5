use serde::{Deserialize, Serialize};

/// Ответ внешнего API котировок
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteEnvelope {
    #[serde(rename = "USDBRL")]
    pub usdbrl: Quote,
}

/// Котировка USD/BRL в том виде, в котором ее отдает провайдер (все поля строками)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub code: String,
    pub codein: String,
    pub name: String,
    pub high: String,
    pub low: String,
    #[serde(rename = "varBid")]
    pub var_bid: String,
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    pub bid: String,
    pub ask: String,
    pub timestamp: String,
    pub create_date: String,
}

/// Ответ на GET /cotacao
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceResponse {
    pub price: String,
}
impl From<&Quote> for PriceResponse {
    fn from(quote: &Quote) -> Self {
        Self {
            price: quote.bid.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.2891","low":"5.2302","varBid":"-0.0142","pctChange":"-0.27","bid":"5.2500","ask":"5.2510","timestamp":"1718287195","create_date":"2024-06-13 10:59:55"}}"#;

    #[test]
    fn decodes_provider_payload() {
        let envelope: QuoteEnvelope = serde_json::from_str(PAYLOAD).unwrap();
        let quote = envelope.usdbrl;
        assert_eq!(quote.code, "USD");
        assert_eq!(quote.codein, "BRL");
        assert_eq!(quote.var_bid, "-0.0142");
        assert_eq!(quote.pct_change, "-0.27");
        assert_eq!(quote.create_date, "2024-06-13 10:59:55");
    }

    #[test]
    fn price_is_bid_verbatim() {
        let envelope: QuoteEnvelope = serde_json::from_str(PAYLOAD).unwrap();
        let response = PriceResponse::from(&envelope.usdbrl);
        assert_eq!(response.price, "5.2500");
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"price":"5.2500"}"#
        );
    }

    #[test]
    fn rejects_payload_without_usdbrl() {
        let result = serde_json::from_str::<QuoteEnvelope>(r#"{"EURBRL":{"bid":"6.0"}}"#);
        assert!(result.is_err());
    }
}
