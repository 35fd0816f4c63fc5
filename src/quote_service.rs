use std::time::Duration;

use crate::{
    models::{AppState, Quote, QuoteEnvelope},
    AppError, Result,
};

/// Клиент внешнего API котировок USD/BRL
#[derive(Clone)]
pub struct QuoteFetcher {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}
impl QuoteFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| AppError::FetchTransport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    /// Один запрос без повторов. Таймаут считается от начала запроса до конца чтения тела;
    /// если обработчик входящего запроса отменен, запрос к провайдеру отменяется вместе с ним
    pub async fn fetch(&self) -> Result<Quote> {
        tracing::info!("Запрашиваю курс доллара");
        match tokio::time::timeout(self.timeout, self.request()).await {
            Ok(Ok(quote)) => {
                tracing::info!("Курс доллара получен: {}", quote.bid);
                Ok(quote)
            }
            Ok(Err(e)) => {
                tracing::error!("Ошибка получения курса доллара: {e}");
                Err(e)
            }
            Err(_) => {
                let e = AppError::FetchTimeout(self.timeout);
                tracing::error!("Ошибка получения курса доллара: {e}");
                Err(e)
            }
        }
    }

    async fn request(&self) -> Result<Quote> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        tracing::debug!("Провайдер ответил статусом {}", response.status());
        let envelope = response
            .json::<QuoteEnvelope>()
            .await
            .map_err(|e| self.classify(e))?;
        Ok(envelope.usdbrl)
    }

    fn classify(&self, e: reqwest::Error) -> AppError {
        if e.is_decode() {
            AppError::Decode(e.to_string())
        } else {
            AppError::FetchTransport(e.to_string())
        }
    }
}

/// Чем закончилась обработка одного запроса
#[derive(Debug)]
pub enum Outcome {
    /// Котировку получить не удалось, сохранять нечего
    FetchFailed(AppError),
    /// Котировка получена; `persist_error` содержит первую ошибку сохранения, если была
    Fetched {
        quote: Quote,
        persist_error: Option<AppError>,
    },
}

/// Получить котировку и сохранить ее сначала в базу, потом в файл.
/// Ошибка базы прерывает цепочку: файл в этом случае не трогается
pub async fn process(state: &AppState) -> Outcome {
    let quote = match state.fetcher.fetch().await {
        Ok(quote) => quote,
        Err(e) => return Outcome::FetchFailed(e),
    };
    let persist_error = persist(state, &quote).await.err();
    Outcome::Fetched {
        quote,
        persist_error,
    }
}

async fn persist(state: &AppState, quote: &Quote) -> Result<()> {
    if let Err(e) = state.storage.save(quote).await {
        tracing::error!("Ошибка сохранения котировки в базе данных: {e}");
        return Err(e);
    }
    if let Err(e) = state.quote_file.save(quote).await {
        tracing::error!("Ошибка записи котировки в файл: {e}");
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAYLOAD: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.2891","low":"5.2302","varBid":"-0.0142","pctChange":"-0.27","bid":"5.25","ask":"5.2510","timestamp":"1718287195","create_date":"2024-06-13 10:59:55"}}"#;

    async fn create_mock_server(response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/last/USD-BRL"))
            .respond_with(response)
            .mount(&mock_server)
            .await;
        mock_server
    }

    fn fetcher(mock_server: &MockServer, timeout_ms: u64) -> QuoteFetcher {
        let url = format!("{}/json/last/USD-BRL", mock_server.uri());
        QuoteFetcher::new(url, Duration::from_millis(timeout_ms)).unwrap()
    }

    #[test_log::test(tokio::test)]
    async fn fetches_quote() {
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(PAYLOAD)).await;
        let quote = fetcher(&mock_server, 2000).fetch().await.unwrap();
        assert_eq!(quote.bid, "5.25");
        assert_eq!(quote.ask, "5.2510");
        assert_eq!(quote.name, "Dólar Americano/Real Brasileiro");
    }

    #[test_log::test(tokio::test)]
    async fn slow_provider_times_out() {
        let mock_server = create_mock_server(
            ResponseTemplate::new(200)
                .set_body_string(PAYLOAD)
                .set_delay(Duration::from_millis(600)),
        )
        .await;
        let err = fetcher(&mock_server, 200).fetch().await.unwrap_err();
        assert!(matches!(err, AppError::FetchTimeout(_)), "{err:?}");
    }

    #[test_log::test(tokio::test)]
    async fn malformed_body_is_decode_error() {
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string("not json")).await;
        let err = fetcher(&mock_server, 2000).fetch().await.unwrap_err();
        assert!(matches!(err, AppError::Decode(_)), "{err:?}");
    }

    #[test_log::test(tokio::test)]
    async fn wrong_shape_is_decode_error() {
        let mock_server = create_mock_server(
            ResponseTemplate::new(200).set_body_string(r#"{"USDBRL":{"bid":"5.25"}}"#),
        )
        .await;
        let err = fetcher(&mock_server, 2000).fetch().await.unwrap_err();
        assert!(matches!(err, AppError::Decode(_)), "{err:?}");
    }

    #[test_log::test(tokio::test)]
    async fn refused_connection_is_transport_error() {
        let fetcher =
            QuoteFetcher::new("http://127.0.0.1:1/json", Duration::from_millis(2000)).unwrap();
        let err = fetcher.fetch().await.unwrap_err();
        assert!(matches!(err, AppError::FetchTransport(_)), "{err:?}");
    }
}
