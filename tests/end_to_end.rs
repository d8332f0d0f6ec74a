//! Loads a small road network from its text description and serves requests over it.

use roadroute::loader::{self, FileFormat, Options};
use roadroute::protocol::{self, Request, Response};
use roadroute::server::Server;
use roadroute::{Graph, Point};

//  10 ──> 11 ──> 12
//   ^             │
//   │             v
//  13 <────────── 14          15
const NETWORK: &str = "\
V,10,53.50000,-113.50000
V,11,53.50000,-113.49000
V,12,53.50000,-113.48000
V,13,53.49000,-113.50000
V,14,53.49000,-113.48000
V,15,53.40000,-113.40000
E,10,11,Main Street
E,11,12,Main Street
E,12,14,First Avenue
E,14,13,Second Street
E,13,10,Third Avenue
";

fn server() -> Server {
    let mut g = Graph::default();
    let options = Options {
        file_format: FileFormat::Unknown,
    };
    loader::add_features_from_buffer(&mut g, &options, NETWORK.as_bytes()).unwrap();
    Server::new(g).unwrap()
}

fn request(start: (f64, f64), end: (f64, f64)) -> Request {
    Request::Route {
        start: Point::from_degrees(start.0, start.1),
        end: Point::from_degrees(end.0, end.1),
    }
}

#[test]
fn serve_session() {
    let s = server();

    let mut input = Vec::new();
    protocol::write_request(&mut input, &request((53.5001, -113.5001), (53.4899, -113.5001)))
        .unwrap();
    protocol::write_request(&mut input, &request((53.49, -113.50), (53.41, -113.41))).unwrap();
    protocol::write_request(&mut input, &request((53.50, -113.48), (53.50, -113.4801))).unwrap();
    protocol::write_request(&mut input, &Request::Quit).unwrap();

    let mut output = Vec::new();
    assert_eq!(s.serve(input.as_slice(), &mut output).unwrap(), 3);

    let mut output = output.as_slice();

    // 10 -> 11 -> 12 -> 14 -> 13, the only way around the one-way loop
    assert_eq!(
        protocol::read_response(&mut output).unwrap(),
        Response::Route(vec![
            Point::new(5_350_000, -11_350_000),
            Point::new(5_350_000, -11_349_000),
            Point::new(5_350_000, -11_348_000),
            Point::new(5_349_000, -11_348_000),
            Point::new(5_349_000, -11_350_000),
        ])
    );

    // 15 is isolated
    assert_eq!(
        protocol::read_response(&mut output).unwrap(),
        Response::NoRoute
    );

    // Both ends resolve to 12
    assert_eq!(
        protocol::read_response(&mut output).unwrap(),
        Response::Route(vec![Point::new(5_350_000, -11_348_000)])
    );

    assert!(output.is_empty());
}

#[test]
fn route_distance() {
    let s = server();
    let route = s
        .route(Point::from_degrees(53.5, -113.5), Point::from_degrees(53.49, -113.5))
        .unwrap();

    assert_eq!(route.vertices, vec![10, 11, 12, 14, 13]);
    assert_eq!(route.distance, 1000 + 1000 + 1000 + 2000);
}
