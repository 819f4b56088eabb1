//! Ventana nocturna y reparto día/noche
//!
//! Este módulo contiene la ventana horaria nocturna (con soporte para
//! ventanas que cruzan medianoche) y el reparto minuto a minuto de una
//! duración en minutos de día y de noche.

use chrono::{NaiveTime, Timelike};

/// Minutos en un día completo
pub const MINUTES_PER_DAY: u32 = 1440;

/// Parsear un string "HH:MM" a minutos desde medianoche
///
/// Un valor malformado se trata como 0 (medianoche), lo que deja la
/// ventana efectivamente desactivada en lugar de fallar.
pub fn parse_time_of_day(value: &str) -> u32 {
    let mut parts = value.splitn(2, ':');
    let hours = parts.next().and_then(|h| h.trim().parse::<u32>().ok());
    let minutes = parts.next().and_then(|m| m.trim().parse::<u32>().ok());

    match (hours, minutes) {
        (Some(h), Some(m)) if h < 24 && m < 60 => h * 60 + m,
        _ => 0,
    }
}

/// Convertir un NaiveTime a minutos desde medianoche
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Ventana horaria nocturna en minutos desde medianoche
///
/// Si start > end la ventana cruza medianoche (ej: 20:00–06:00).
/// Una ventana con start == end está vacía.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    start: u32,
    end: u32,
}

impl NightWindow {
    pub fn new(start_minutes: u32, end_minutes: u32) -> Self {
        Self {
            start: start_minutes % MINUTES_PER_DAY,
            end: end_minutes % MINUTES_PER_DAY,
        }
    }

    /// Construir la ventana desde strings "HH:MM" (parseo defensivo)
    pub fn from_hhmm(start: &str, end: &str) -> Self {
        Self::new(parse_time_of_day(start), parse_time_of_day(end))
    }

    /// Verificar si un minuto del día pertenece a la ventana `[start, end)`
    pub fn contains(&self, minute_of_day: u32) -> bool {
        let t = minute_of_day % MINUTES_PER_DAY;
        if self.start > self.end {
            // Cruza medianoche
            t >= self.start || t < self.end
        } else {
            t >= self.start && t < self.end
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Reparto de una duración en minutos de día y de noche
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeSplit {
    pub day_minutes: i64,
    pub night_minutes: i64,
}

impl TimeSplit {
    /// Reparto completamente diurno (ventana nocturna desactivada)
    pub fn all_day(duration_minutes: i64) -> Self {
        Self {
            day_minutes: duration_minutes.max(0),
            night_minutes: 0,
        }
    }

    pub fn total_minutes(&self) -> i64 {
        self.day_minutes + self.night_minutes
    }
}

/// Repartir una duración en minutos de día y de noche
///
/// Camina minuto a minuto desde `start_minute` clasificando cada minuto
/// según su pertenencia a la ventana. No es una fórmula cerrada a
/// propósito: un trayecto puede cruzar medianoche y el fin de la ventana
/// varias veces y cada minuto se clasifica por separado.
pub fn split_by_night_window(
    start_minute: u32,
    duration_minutes: i64,
    window: NightWindow,
) -> TimeSplit {
    let mut split = TimeSplit::default();
    let mut clock = start_minute % MINUTES_PER_DAY;

    for _ in 0..duration_minutes.max(0) {
        if window.contains(clock) {
            split.night_minutes += 1;
        } else {
            split.day_minutes += 1;
        }
        clock = (clock + 1) % MINUTES_PER_DAY;
    }

    split
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("20:00"), 1200);
        assert_eq!(parse_time_of_day("06:30"), 390);
        assert_eq!(parse_time_of_day("00:00"), 0);
        assert_eq!(parse_time_of_day("23:59"), 1439);
    }

    #[test]
    fn test_parse_time_of_day_malformed_defaults_to_zero() {
        assert_eq!(parse_time_of_day(""), 0);
        assert_eq!(parse_time_of_day("garbage"), 0);
        assert_eq!(parse_time_of_day("25:00"), 0);
        assert_eq!(parse_time_of_day("12:75"), 0);
        assert_eq!(parse_time_of_day("12"), 0);
    }

    #[test]
    fn test_window_no_wrap() {
        let window = NightWindow::from_hhmm("00:00", "06:00");
        assert!(window.contains(0));
        assert!(window.contains(359));
        assert!(!window.contains(360));
        assert!(!window.contains(1200));
    }

    #[test]
    fn test_window_wraps_midnight() {
        let window = NightWindow::from_hhmm("20:00", "06:00");
        assert!(window.contains(1200)); // 20:00
        assert!(window.contains(1439)); // 23:59
        assert!(window.contains(0));    // 00:00
        assert!(window.contains(359));  // 05:59
        assert!(!window.contains(360)); // 06:00
        assert!(!window.contains(720)); // 12:00
    }

    #[test]
    fn test_empty_window_is_all_day() {
        let window = NightWindow::from_hhmm("00:00", "00:00");
        assert!(window.is_empty());
        let split = split_by_night_window(0, 120, window);
        assert_eq!(split.day_minutes, 120);
        assert_eq!(split.night_minutes, 0);
    }

    #[test]
    fn test_split_zero_duration() {
        let window = NightWindow::from_hhmm("20:00", "06:00");
        let split = split_by_night_window(1200, 0, window);
        assert_eq!(split, TimeSplit::default());
    }

    #[test]
    fn test_split_crossing_midnight_stays_night() {
        // Ventana 20:00–06:00, salida 23:50, 40 minutos: todo nocturno
        let window = NightWindow::from_hhmm("20:00", "06:00");
        let split = split_by_night_window(parse_time_of_day("23:50"), 40, window);
        assert_eq!(split.night_minutes, 40);
        assert_eq!(split.day_minutes, 0);
    }

    #[test]
    fn test_split_crossing_window_end() {
        // Ventana 00:00–06:00, salida 05:50, 20 minutos: 10 de noche y 10 de día
        let window = NightWindow::from_hhmm("00:00", "06:00");
        let split = split_by_night_window(parse_time_of_day("05:50"), 20, window);
        assert_eq!(split.night_minutes, 10);
        assert_eq!(split.day_minutes, 10);
    }

    #[test]
    fn test_split_conservation() {
        let window = NightWindow::from_hhmm("22:00", "05:30");
        for duration in [0i64, 1, 59, 60, 90, 720, 1440, 2000] {
            let split = split_by_night_window(parse_time_of_day("21:15"), duration, window);
            assert_eq!(split.total_minutes(), duration);
        }
    }

    #[test]
    fn test_split_multiple_crossings() {
        // Trayecto de más de un día cruza la ventana varias veces
        let window = NightWindow::from_hhmm("20:00", "06:00");
        let split = split_by_night_window(parse_time_of_day("00:00"), 1440, window);
        // 00:00–06:00 (360) + 20:00–24:00 (240) de noche en un día completo
        assert_eq!(split.night_minutes, 600);
        assert_eq!(split.day_minutes, 840);
    }

    #[test]
    fn test_minutes_since_midnight() {
        let t = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        assert_eq!(minutes_since_midnight(t), 870);
    }
}
