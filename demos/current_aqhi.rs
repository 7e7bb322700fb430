use ec_aqhi::{AirQuality, AqhiError, LatLon};
use std::env;

#[tokio::main]
async fn main() -> Result<(), AqhiError> {
    env_logger::init();

    // Usage: current_aqhi [latitude longitude] [language]
    let args: Vec<String> = env::args().skip(1).collect();
    let location = match (args.first(), args.get(1)) {
        (Some(lat), Some(lon)) => match (lat.parse(), lon.parse()) {
            (Ok(lat), Ok(lon)) => LatLon(lat, lon),
            _ => {
                eprintln!("Latitude and longitude must be decimal degrees");
                std::process::exit(2);
            }
        },
        _ => LatLon(43.6532, -79.3832), // Toronto
    };
    let language = args.get(2).cloned().unwrap_or_else(|| "EN".to_string());

    let aqhi = AirQuality::builder()
        .location(location)
        .language(language)
        .build()?;
    aqhi.refresh().await?;

    println!(
        "Region {}/{}",
        aqhi.zone_id().unwrap_or("?"),
        aqhi.region_id().unwrap_or("?")
    );
    match (aqhi.current(), aqhi.current_timestamp()) {
        (Some(index), Some(at)) => println!("Current AQHI: {index} at {at}"),
        (Some(index), None) => println!("Current AQHI: {index}"),
        _ => println!("No current AQHI reading"),
    }
    for (period, index) in aqhi.daily_forecasts() {
        println!("{period}: {index}");
    }
    for (hour, index) in aqhi.hourly_forecasts() {
        println!("{}: {index}", hour.format("%Y-%m-%d %H:%M UTC"));
    }

    Ok(())
}
