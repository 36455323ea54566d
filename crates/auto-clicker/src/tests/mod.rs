mod binding;
mod config;
