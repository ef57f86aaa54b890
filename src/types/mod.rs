pub mod city_report;
pub mod forecast_day;
