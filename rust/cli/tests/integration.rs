#![deny(missing_debug_implementations, unused_must_use)]
mod helpers;
mod integration {
    mod cli_basic;
    mod config_precedence;
    mod round_log_workflow;
}
