use barprobe::collectors::network;
use barprobe::runner::SystemRunner;
use barprobe::status;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "wifi-signal")]
#[command(version)]
#[command(about = "Reads network connectivity and prints one status-bar JSON record")]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    barprobe::init_tracing();
    let _cli = Cli::parse();

    let reading = network::collect(&SystemRunner).await;
    let record = status::network_record(&reading);
    println!("{}", record.to_json());
}
