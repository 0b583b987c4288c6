pub mod time_format;
