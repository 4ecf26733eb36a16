mod config;
mod form_flow;
mod navigation;
mod session;
