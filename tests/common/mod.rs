//! Loopback HTTP responder shared by the integration tests.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

/// Small dataset in the positional layout (country, code, year, 3 fillers, value).
pub const SAMPLE_CSV: &str = "\
country,code,year,a,b,c,value
Chad,TCD,2000,,,,10.0
Chad,TCD,2001,,,,20.0
Chad,TCD,2002,,,,30.0
Albania,ALB,1999,,,,4.25
Chad,TCD,2003,,,,not-a-number
";

/// Serve `times` requests with the given status line and body, then stop.
/// Returns the URL to request.
pub fn serve(status: &str, body: &str, times: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    thread::spawn(move || {
        for _ in 0..times {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            // Drain the request head.
            while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });
    format!("http://{addr}/owid-co2-data.csv")
}

/// A URL on a port that nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/owid-co2-data.csv")
}
