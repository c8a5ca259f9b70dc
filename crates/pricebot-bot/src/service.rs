//! User-facing bot operations.

use pricebot_core::error::{ChartError, DataError};
use pricebot_core::traits::{ChartRenderer, FiatRateProvider};
use pricebot_core::types::{Interval, LookbackLabel, SymbolQuote, TimeSeries};
use pricebot_data::{resolve_all, PriceSnapshotFetcher, SeriesCache};
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use crate::action::Action;
use crate::format;
use crate::reply::{Button, Keyboard, Reply};

/// Display and chart parameters.
#[derive(Debug, Clone)]
pub struct PriceBotSettings {
    pub usdt_to_toman: Decimal,
    pub chart_interval: Interval,
    pub chart_limit: u16,
}

impl Default for PriceBotSettings {
    fn default() -> Self {
        Self {
            usdt_to_toman: Decimal::from(60_000),
            chart_interval: Interval::Hour1,
            chart_limit: 30,
        }
    }
}

/// The bot's operations, independent of the chat transport.
///
/// Every operation answers with a [`Reply`]; provider failures and cache
/// misses become a single [`Reply::Notice`] and never escape as errors.
pub struct PriceBot {
    fetcher: PriceSnapshotFetcher,
    series: SeriesCache,
    fiat: Option<Arc<dyn FiatRateProvider>>,
    renderer: Arc<dyn ChartRenderer>,
    settings: PriceBotSettings,
}

impl PriceBot {
    pub fn new(
        fetcher: PriceSnapshotFetcher,
        series: SeriesCache,
        renderer: Arc<dyn ChartRenderer>,
        settings: PriceBotSettings,
    ) -> Self {
        Self {
            fetcher,
            series,
            fiat: None,
            renderer,
            settings,
        }
    }

    /// Enable the fiat-rate commands.
    pub fn with_fiat_rates(mut self, provider: Arc<dyn FiatRateProvider>) -> Self {
        self.fiat = Some(provider);
        self
    }

    pub fn series_cache(&self) -> &SeriesCache {
        &self.series
    }

    pub fn help(&self) -> Reply {
        Reply::text(format::HELP)
    }

    /// Ranked price list, one row of buttons per symbol.
    pub async fn top_prices(&self) -> Reply {
        let quotes = self.fetcher.top().await;
        if quotes.is_empty() {
            return Reply::notice("Cannot fetch prices");
        }

        let rate = self.settings.usdt_to_toman;
        let keyboard: Keyboard = quotes
            .iter()
            .map(|q| {
                let action = Action::Price {
                    symbol: q.symbol.clone(),
                };
                vec![
                    Button::new(q.symbol.clone(), action.clone()),
                    Button::new(format!("{} Toman", format::toman(q.price, rate)), action.clone()),
                    Button::new(format::usdt(q.price), action),
                ]
            })
            .collect();

        Reply::with_keyboard(format!("💹 Top {} coins", quotes.len()), keyboard)
    }

    /// Live price of one symbol.
    pub async fn price_detail(&self, symbol: &str) -> Reply {
        match self.fetcher.price_of(symbol).await {
            Ok(price) => Reply::text(format::price_detail(
                symbol,
                price,
                self.settings.usdt_to_toman,
            )),
            Err(_) => Reply::notice(format!("Cannot fetch {}", symbol)),
        }
    }

    /// Chart `requested`, or a random top symbol when none is given.
    pub async fn chart(&self, requested: Option<&str>) -> Reply {
        let symbol = match requested.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => self.fetcher.qualify(raw),
            None => {
                let quotes = self.fetcher.top().await;
                match pick_random(&quotes) {
                    Some(symbol) => symbol,
                    None => return Reply::notice("Cannot fetch prices"),
                }
            }
        };

        let series = match self
            .series
            .fetch_and_store(&symbol, self.settings.chart_interval, self.settings.chart_limit)
            .await
        {
            Ok(series) => series,
            Err(_) => return Reply::notice(format!("Cannot fetch {}", symbol)),
        };

        let image = match self.render(Arc::clone(&series)).await {
            Ok(image) => image,
            Err(e) => {
                warn!("Chart rendering for {} failed: {}", symbol, e);
                return Reply::notice(format!("Cannot draw chart for {}", symbol));
            }
        };

        let keyboard: Keyboard = resolve_all(&series)
            .iter()
            .map(|point| {
                vec![Button::new(
                    format::lookback_button(point),
                    Action::Lookback {
                        symbol: symbol.clone(),
                        label: point.label,
                    },
                )]
            })
            .collect();

        info!("Charted {} ({} candles)", symbol, series.len());
        Reply::Photo {
            image,
            caption: symbol,
            keyboard: Some(keyboard),
        }
    }

    /// A lookback point of a previously charted symbol.
    pub async fn lookback(&self, symbol: &str, label: LookbackLabel) -> Reply {
        match self.series.lookup(symbol, label).await {
            Ok(point) => Reply::text(format::lookback_detail(
                symbol,
                &point,
                self.settings.usdt_to_toman,
            )),
            Err(DataError::NotCached(_)) => Reply::notice(format!("No cached data for {}", symbol)),
            Err(e) => {
                warn!("Lookback for {} failed: {}", symbol, e);
                Reply::notice(format!("Cannot fetch {}", symbol))
            }
        }
    }

    /// Fiat rate list, one row of buttons per currency.
    pub async fn fiat_rates(&self) -> Reply {
        let Some(provider) = &self.fiat else {
            return Reply::notice("Other currencies are not configured");
        };

        let rates = match provider.rates().await {
            Ok(rates) if !rates.is_empty() => rates,
            Ok(_) => return Reply::notice("Cannot fetch other currencies"),
            Err(e) => {
                warn!("Fiat rate fetch from {} failed: {}", provider.name(), e);
                return Reply::notice("Cannot fetch other currencies");
            }
        };

        let keyboard: Keyboard = rates
            .values()
            .map(|rate| {
                let action = Action::Fiat {
                    key: rate.symbol.clone(),
                };
                vec![
                    Button::new(rate.symbol.clone(), action.clone()),
                    Button::new(format!("{} Toman", rate.value), action.clone()),
                    Button::new(format!("Δ {}", rate.change), action),
                ]
            })
            .collect();

        Reply::with_keyboard("💱 Other currencies", keyboard)
    }

    /// Detail of one fiat rate, fetched fresh.
    pub async fn fiat_detail(&self, key: &str) -> Reply {
        let Some(provider) = &self.fiat else {
            return Reply::notice("Other currencies are not configured");
        };

        match provider.rates().await {
            Ok(rates) => match rates.get(key) {
                Some(rate) => Reply::text(format::fiat_detail(rate)),
                None => Reply::notice(format!("Cannot fetch {}", key)),
            },
            Err(e) => {
                warn!("Fiat rate fetch from {} failed: {}", provider.name(), e);
                Reply::notice(format!("Cannot fetch {}", key))
            }
        }
    }

    /// Dispatch a decoded button press.
    pub async fn handle_action(&self, action: &Action) -> Reply {
        match action {
            Action::Price { symbol } => self.price_detail(symbol).await,
            Action::Lookback { symbol, label } => self.lookback(symbol, *label).await,
            Action::Fiat { key } => self.fiat_detail(key).await,
        }
    }

    async fn render(&self, series: Arc<TimeSeries>) -> Result<Vec<u8>, ChartError> {
        let renderer = Arc::clone(&self.renderer);
        tokio::task::spawn_blocking(move || renderer.render(&series))
            .await
            .map_err(|e| ChartError::Render(e.to_string()))?
    }
}

fn pick_random(quotes: &[SymbolQuote]) -> Option<String> {
    quotes
        .choose(&mut rand::thread_rng())
        .map(|q| q.symbol.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pricebot_core::traits::{KlineProvider, QuoteProvider};
    use pricebot_core::types::{FiatRate, RawKline, TickerSnapshot};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Calls {
        tickers: AtomicUsize,
        klines: AtomicUsize,
        renders: AtomicUsize,
    }

    struct FakeQuotes {
        rows: Option<Vec<TickerSnapshot>>,
        calls: Arc<Calls>,
    }

    #[async_trait]
    impl QuoteProvider for FakeQuotes {
        async fn tickers(&self) -> Result<Vec<TickerSnapshot>, DataError> {
            self.calls.tickers.fetch_add(1, Ordering::SeqCst);
            self.rows
                .clone()
                .ok_or_else(|| DataError::unavailable("500 Internal Server Error"))
        }

        async fn price(&self, symbol: &str) -> Result<Decimal, DataError> {
            match symbol {
                "BTCUSDT" => Ok(dec!(2)),
                _ => Err(DataError::unavailable("400 Bad Request")),
            }
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    struct FakeKlines {
        len: usize,
        calls: Arc<Calls>,
    }

    #[async_trait]
    impl KlineProvider for FakeKlines {
        async fn klines(
            &self,
            symbol: &str,
            _interval: Interval,
            _limit: u16,
        ) -> Result<Vec<RawKline>, DataError> {
            self.calls.klines.fetch_add(1, Ordering::SeqCst);
            if symbol == "DEADUSDT" {
                return Err(DataError::unavailable("400 Invalid symbol"));
            }
            Ok((0..self.len)
                .map(|i| RawKline::new(1_700_000_000_000 + i as i64 * 3_600_000, (10 + i).to_string()))
                .collect())
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    struct FakeRenderer {
        calls: Arc<Calls>,
    }

    impl ChartRenderer for FakeRenderer {
        fn render(&self, _series: &TimeSeries) -> Result<Vec<u8>, ChartError> {
            self.calls.renders.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1, 2, 3])
        }
    }

    struct FakeRates(Option<BTreeMap<String, FiatRate>>);

    #[async_trait]
    impl FiatRateProvider for FakeRates {
        async fn rates(&self) -> Result<BTreeMap<String, FiatRate>, DataError> {
            self.0.clone().ok_or_else(|| DataError::unavailable("timeout"))
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    fn bot(rows: Option<Vec<TickerSnapshot>>, candles: usize) -> (PriceBot, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let fetcher = PriceSnapshotFetcher::new(Arc::new(FakeQuotes {
            rows,
            calls: Arc::clone(&calls),
        }));
        let series = SeriesCache::new(Arc::new(FakeKlines {
            len: candles,
            calls: Arc::clone(&calls),
        }));
        let renderer = Arc::new(FakeRenderer {
            calls: Arc::clone(&calls),
        });
        let bot = PriceBot::new(fetcher, series, renderer, PriceBotSettings::default());
        (bot, calls)
    }

    fn tickers() -> Vec<TickerSnapshot> {
        vec![
            TickerSnapshot::new("BTCUSDT", Some("65000"), Some("900")),
            TickerSnapshot::new("ETHUSDT", Some("3000"), Some("800")),
            TickerSnapshot::new("ETHBTC", Some("0.05"), Some("10000")),
        ]
    }

    fn rate(symbol: &str, value: &str) -> FiatRate {
        FiatRate {
            symbol: symbol.to_string(),
            value: value.to_string(),
            change: "-100".to_string(),
            date: "1402-08-23".to_string(),
        }
    }

    #[tokio::test]
    async fn test_chart_stops_after_ticker_failure() {
        let (bot, calls) = bot(None, 30);

        let reply = bot.chart(None).await;

        assert_eq!(reply, Reply::notice("Cannot fetch prices"));
        assert_eq!(calls.tickers.load(Ordering::SeqCst), 1);
        assert_eq!(calls.klines.load(Ordering::SeqCst), 0);
        assert_eq!(calls.renders.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_top_prices_keyboard() {
        let (bot, _) = bot(Some(tickers()), 30);

        let reply = bot.top_prices().await;
        let keyboard = reply.keyboard().unwrap();

        assert_eq!(keyboard.len(), 2);
        assert_eq!(keyboard[0][0].label, "BTCUSDT");
        assert_eq!(keyboard[0][1].label, "3,900,000,000 Toman");
        assert_eq!(keyboard[0][2].label, "65000.000000 USDT");
        assert!(keyboard[0].iter().all(|b| b.action
            == Action::Price {
                symbol: "BTCUSDT".into()
            }));
    }

    #[tokio::test]
    async fn test_top_prices_failure_is_notice() {
        let (bot, _) = bot(None, 30);
        assert!(bot.top_prices().await.is_notice());
    }

    #[tokio::test]
    async fn test_chart_random_pick_and_lookback_buttons() {
        let (bot, calls) = bot(Some(tickers()), 30);

        let Reply::Photo {
            image,
            caption,
            keyboard,
        } = bot.chart(None).await
        else {
            panic!("expected a photo");
        };

        assert!(caption == "BTCUSDT" || caption == "ETHUSDT");
        assert_eq!(image, vec![1, 2, 3]);
        let keyboard = keyboard.unwrap();
        assert_eq!(keyboard.len(), 4);
        assert_eq!(keyboard[0][0].label, "Current: 39.000000 USDT");
        assert_eq!(keyboard[1][0].label, "Yesterday: 16.000000 USDT");
        assert_eq!(keyboard[3][0].label, "Last month: 10.000000 USDT");
        assert_eq!(
            keyboard[1][0].action,
            Action::Lookback {
                symbol: caption.clone(),
                label: LookbackLabel::Yesterday
            }
        );
        assert_eq!(calls.renders.load(Ordering::SeqCst), 1);
        assert!(bot.series_cache().get(&caption).await.is_some());
    }

    #[tokio::test]
    async fn test_chart_requested_symbol_skips_ranking() {
        let (bot, calls) = bot(None, 5);

        let reply = bot.chart(Some(" sol ")).await;

        assert!(matches!(&reply, Reply::Photo { caption, .. } if caption == "SOLUSDT"));
        assert_eq!(calls.tickers.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chart_kline_failure_skips_render() {
        let (bot, calls) = bot(None, 5);

        let reply = bot.chart(Some("DEADUSDT")).await;

        assert_eq!(reply, Reply::notice("Cannot fetch DEADUSDT"));
        assert_eq!(calls.renders.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lookback_after_chart() {
        let (bot, _) = bot(None, 5);
        bot.chart(Some("BTCUSDT")).await;

        let reply = bot
            .handle_action(&Action::Lookback {
                symbol: "BTCUSDT".into(),
                label: LookbackLabel::LastMonth,
            })
            .await;

        let Reply::Text { text, .. } = reply else {
            panic!("expected text");
        };
        assert!(text.starts_with("BTCUSDT - Last month\nPrice: 10.000000 USDT"));
    }

    #[tokio::test]
    async fn test_lookback_without_chart_is_not_cached() {
        let (bot, calls) = bot(None, 5);

        let reply = bot.lookback("BTCUSDT", LookbackLabel::Current).await;

        assert_eq!(reply, Reply::notice("No cached data for BTCUSDT"));
        assert_eq!(calls.klines.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_price_detail() {
        let (bot, _) = bot(None, 5);

        assert_eq!(
            bot.handle_action(&Action::Price {
                symbol: "BTCUSDT".into()
            })
            .await,
            Reply::text("BTCUSDT\nPrice: 2.000000 USDT\n≈ 120,000 Toman")
        );
        assert_eq!(
            bot.price_detail("NOPEUSDT").await,
            Reply::notice("Cannot fetch NOPEUSDT")
        );
    }

    #[tokio::test]
    async fn test_fiat_rates_and_detail() {
        let mut rates = BTreeMap::new();
        rates.insert("usd".to_string(), rate("usd", "59850"));
        rates.insert("eur".to_string(), rate("eur", "64100"));
        let (bot, _) = bot(None, 5);
        let bot = bot.with_fiat_rates(Arc::new(FakeRates(Some(rates))));

        let reply = bot.fiat_rates().await;
        let keyboard = reply.keyboard().unwrap();
        assert_eq!(keyboard.len(), 2);
        assert_eq!(keyboard[0][0].label, "eur");
        assert_eq!(keyboard[1][1].label, "59850 Toman");
        assert_eq!(keyboard[1][2].label, "Δ -100");

        let detail = bot.fiat_detail("usd").await;
        assert_eq!(
            detail,
            Reply::text("usd\nPrice: 59850 Toman\nChange since yesterday: -100\nDate: 1402-08-23")
        );
        assert_eq!(bot.fiat_detail("gbp").await, Reply::notice("Cannot fetch gbp"));
    }

    #[tokio::test]
    async fn test_fiat_failure_and_missing_provider() {
        let (bot, _) = bot(None, 5);
        assert_eq!(
            bot.fiat_rates().await,
            Reply::notice("Other currencies are not configured")
        );

        let bot = bot.with_fiat_rates(Arc::new(FakeRates(None)));
        assert_eq!(
            bot.fiat_rates().await,
            Reply::notice("Cannot fetch other currencies")
        );
    }

    #[test]
    fn test_pick_random_empty() {
        assert_eq!(pick_random(&[]), None);
        let only = [SymbolQuote {
            symbol: "BTCUSDT".into(),
            price: dec!(1),
            volume: dec!(1),
        }];
        assert_eq!(pick_random(&only).as_deref(), Some("BTCUSDT"));
    }
}
