pub mod weekday_pattern;
