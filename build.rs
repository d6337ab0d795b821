fn main() {
    // Re-run when the frontend changes so the embedded assets stay current.
    println!("cargo:rerun-if-changed=ui");

    // Tauri build will embed Windows resources (icons) if RC.EXE is available.
    tauri_build::build()
}
