use std::sync::Arc;
use ticket_issuer::{
    application::{self, ApplicationEnv},
    auth::SessionCodec,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(debug_assertions)]
    {
        // Ignore error because .env file is not required
        // as long as env variables are set
        let _ = dotenvy::dotenv();
    }

    let env = ApplicationEnv::parse()?;

    application::setup_tracing(&env)?;

    let session_codec = Arc::new(SessionCodec::new(
        env.session_secret.as_bytes(),
        env.session_lifespan,
        env.public_base_url.starts_with("https://"),
    ));

    let (state, state_to_close) = application::create_state(&env, session_codec.clone()).await?;
    let middleware = application::create_middleware(&env, session_codec);
    let app = application::create_application(state, middleware);

    tracing::info!(address = %env.bind_address, public_base_url = %env.public_base_url, "listening");
    let listener = TcpListener::bind(env.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(application::shutdown_signal())
        .await?;

    application::close(state_to_close).await;

    Ok(())
}
