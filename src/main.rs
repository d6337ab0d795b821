// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// This is the primary entry point for the Depth & Light FX application.
// The session, generation client, and command handlers live in the library crate.

fn main() -> anyhow::Result<()> {
    depth_light_fx_lib::run()
}
