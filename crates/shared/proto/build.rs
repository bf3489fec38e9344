fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile SSO auth proto
    tonic_build::configure()
        .build_server(true)
        .build_client(false)
        .compile_protos(&["proto/sso.proto"], &["proto/"])?;

    Ok(())
}
