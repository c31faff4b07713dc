#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    cat_entertainer_lib::run()
}
