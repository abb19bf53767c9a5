//! Price candles

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One open/high/low/close/volume candle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ohlcv {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Candle start, milliseconds since the Unix epoch
    pub time: i64,
}

impl Ohlcv {
    pub fn new(open: f64, high: f64, low: f64, close: f64, volume: f64, time: i64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            time,
        }
    }
}

/// Sort candles ascending by time and drop everything before `time_from` (ms)
pub fn chart_from(mut candles: Vec<Ohlcv>, time_from: i64) -> Vec<Ohlcv> {
    candles.retain(|candle| candle.time >= time_from);
    candles.sort_by_key(|candle| candle.time);
    candles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(time: i64) -> Ohlcv {
        Ohlcv::new(1.0, 2.0, 0.5, 1.5, 100.0, time)
    }

    #[test]
    fn test_chart_is_sorted_and_bounded() {
        let chart = chart_from(vec![candle(3_000), candle(1_000), candle(2_000), candle(500)], 1_000);
        let times: Vec<i64> = chart.iter().map(|c| c.time).collect();
        assert_eq!(times, vec![1_000, 2_000, 3_000]);
    }

    #[test]
    fn test_chart_empty_when_everything_is_older() {
        assert!(chart_from(vec![candle(1), candle(2)], 10).is_empty());
    }
}
