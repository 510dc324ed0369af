use barprobe::collectors::temperature;
use barprobe::runner::SystemRunner;
use barprobe::status;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cpu-temp")]
#[command(version)]
#[command(about = "Reads the CPU temperature and prints one status-bar JSON record")]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    barprobe::init_tracing();
    let _cli = Cli::parse();

    let reading = temperature::collect(&SystemRunner).await;
    let record = status::temperature_record(reading);
    println!("{}", record.to_json());
}
