//! 원시 레코드 → 표 정규화.
//!
//! 수집 단계는 원시 레코드 목록만 반환하고, 표 변환은 이 모듈의 순수 함수가
//! 담당합니다. 두 단계가 분리되어 있어 네트워크 없이 변환만 검증할 수 있습니다.

use crate::clock::{MarketClock, TIME_FORMAT};
use crate::error::{CoreError, CoreResult};

use super::intraday::{IntradayRow, IntradayTable, Tick, TickTimestamp};
use super::price::{Bar, PriceRow, PriceTable};

/// 일봉 목록을 가격 표로 변환합니다.
///
/// - 빈 입력은 빈 표를 반환합니다.
/// - `rendimiento[0] = 0`, 이후 `(close[i] - close[i-1]) / close[i-1] * 100`
///
/// # Errors
///
/// - `CoreError::Division`: 직전 종가가 0인 경우
/// - `CoreError::InvalidInput`: 표현할 수 없는 타임스탬프
pub fn normalize_bars(bars: &[Bar], clock: &MarketClock) -> CoreResult<PriceTable> {
    let mut rows = Vec::with_capacity(bars.len());
    let mut prev_close: Option<f64> = None;

    for (i, bar) in bars.iter().enumerate() {
        let rendimiento = match prev_close {
            None => 0.0,
            Some(prev) if prev == 0.0 => {
                return Err(CoreError::Division(format!(
                    "close[{}] is zero, return undefined for {}",
                    i - 1,
                    clock.date_of(bar.time)?
                )));
            }
            Some(prev) => (bar.close - prev) / prev * 100.0,
        };

        rows.push(PriceRow {
            fecha: clock.date_of(bar.time)?,
            apertura: bar.open,
            maximo: bar.high,
            minimo: bar.low,
            cierre: bar.close,
            rendimiento,
            volumen: bar.volume,
        });
        prev_close = Some(bar.close);
    }

    Ok(PriceTable::new(rows))
}

/// 체결 목록을 장중 표로 변환합니다. 빈 입력은 빈 표를 반환합니다.
pub fn normalize_ticks(ticks: &[Tick], clock: &MarketClock) -> CoreResult<IntradayTable> {
    let rows = ticks
        .iter()
        .map(|tick| {
            let hora = match tick.timestamp {
                TickTimestamp::Epoch(ts) => clock.time_of(ts)?,
                TickTimestamp::Wall(dt) => dt.format(TIME_FORMAT).to_string(),
            };
            Ok(IntradayRow {
                hora,
                nominales: tick.quantity,
                precio: tick.price,
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(IntradayTable::new(rows))
}
