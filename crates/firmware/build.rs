use std::io;

fn main() -> io::Result<()> {
    // Only run linker script setup for hardware builds
    #[cfg(feature = "hardware")]
    {
        use std::env;
        use std::fs;
        use std::path::PathBuf;

        // Put `memory.x` in our output directory and ensure it's on the linker search path.
        let out = PathBuf::from(
            env::var_os("OUT_DIR").ok_or_else(|| io::Error::other("OUT_DIR not set"))?,
        );
        fs::write(out.join("memory.x"), include_bytes!("../../memory.x"))?;

        println!("cargo:rustc-link-search={}", out.display());
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
        println!("cargo:rerun-if-changed=../../memory.x");
    }

    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
