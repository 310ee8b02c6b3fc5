use chirp_client::{ChirpClientGrpc, ChirpClientHttp, ChirpClientTrait};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(about = "Read and post to a chirp feed")]
struct Cli {
    /// Talk to the gRPC endpoint instead of the JSON API
    #[arg(short, long)]
    grpc: bool,

    #[arg(short, long)]
    server: Option<String>,

    /// Session token issued by the identity provider
    #[arg(long, env = "CHIRP_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the latest posts, newest first
    Feed,
    /// Publish a post (1 to 200 characters)
    Post { content: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let mut client: Box<dyn ChirpClientTrait> = if args.grpc {
        let endpoint = args.server.as_deref().unwrap_or("http://127.0.0.1:50051");
        Box::new(ChirpClientGrpc::connect(endpoint, args.token).await?)
    } else {
        let endpoint = args.server.as_deref().unwrap_or("http://127.0.0.1:8080");
        Box::new(ChirpClientHttp::connect(endpoint, args.token)?)
    };

    match args.command {
        Command::Feed => {
            let feed = client.get_all().await?;
            if feed.is_empty() {
                println!("No posts yet.");
            }
            for entry in feed {
                println!("{entry}\n");
            }
        }
        Command::Post { content } => {
            let post = client.create_post(content).await?;
            println!("Posted {} at {}", post.id, post.created_at);
        }
    }

    Ok(())
}
