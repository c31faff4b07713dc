#[cfg(feature = "desktop")]
pub mod commands;
pub mod core;
pub mod domain;
pub mod infra;
pub mod state;

#[cfg(feature = "desktop")]
pub fn run() {
    use commands::icon::{current_icon, reset_icon, select_icon};
    use commands::motion::{
        get_motion_state, reset_motion, resize_motion_area, set_motion_speed, start_motion,
        step_motion_speed, stop_motion, toggle_motion, MOTION_EVENT,
    };
    use infra::config::load_config_from_env;
    use infra::logging::init_tracing;
    use state::RuntimeState;
    use tauri::{Emitter, Manager};

    init_tracing();

    tauri::Builder::default()
        .setup(|app| {
            let config = load_config_from_env().map_err(|error| error.to_string())?;
            let runtime = RuntimeState::new(config);
            let mut updates = runtime.controller.subscribe();
            app.manage(runtime);

            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                while updates.changed().await.is_ok() {
                    let snapshot = updates.borrow_and_update().clone();
                    if let Err(error) = handle.emit(MOTION_EVENT, snapshot) {
                        tracing::warn!("failed to emit motion state: {error}");
                    }
                }
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            start_motion,
            stop_motion,
            toggle_motion,
            resize_motion_area,
            reset_motion,
            set_motion_speed,
            step_motion_speed,
            get_motion_state,
            select_icon,
            reset_icon,
            current_icon
        ])
        .run(tauri::generate_context!())
        .expect("failed to run Cat Entertainer");
}
