use itrack_api::{Client, ItrackApiError, Request};

#[tokio::main]
pub async fn main() -> Result<(), ItrackApiError> {
    let client = Client::new();

    let req = Request::tracking()
        .with_token("access_token")
        .track("868120145233604");

    let res = client.send(req).await?;
    match res.into_record() {
        Ok(records) => println!("{:?}", records.first()),
        Err(failure) => eprintln!("{}", failure.describe("Failed to track vehicle")),
    }
    Ok(())
}
