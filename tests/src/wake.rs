use std::net::{SocketAddr, SocketAddrV4};
use std::time::Duration;

use tokio::net::UdpSocket;

use wakehub_common::config::Config;
use wakehub_core::wol;

async fn loopback_listener() -> (UdpSocket, SocketAddrV4) {
    let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let dest = match listener.local_addr().unwrap() {
        SocketAddr::V4(v4) => v4,
        other => panic!("unexpected listener address {other}"),
    };
    (listener, dest)
}

async fn recv_one(listener: &UdpSocket) -> Vec<u8> {
    let mut buf = [0u8; 256];
    let (n, _) = tokio::time::timeout(Duration::from_secs(5), listener.recv_from(&mut buf))
        .await
        .expect("no datagram within 5s")
        .unwrap();
    buf[..n].to_vec()
}

#[tokio::test]
async fn wake_to_delivers_a_full_magic_packet() {
    let (listener, dest) = loopback_listener().await;

    let config = Config {
        mac: Some("aa-bb-cc-dd-ee-ff".to_string()),
        bind_ip: Some("127.0.0.1".to_string()),
        ..Config::default()
    };
    wol::wake_to(&config, dest).await.unwrap();

    let datagram = recv_one(&listener).await;
    assert_eq!(datagram.len(), 102);
    assert_eq!(&datagram[..6], &[0xFF; 6]);
    for repeat in datagram[6..].chunks(6) {
        assert_eq!(repeat, &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    }
}

#[tokio::test]
async fn a_missing_wol_interface_falls_back_to_the_default_route() {
    let (listener, dest) = loopback_listener().await;

    let config = Config {
        mac: Some("AA:BB:CC:DD:EE:FF".to_string()),
        wol_interface: Some("wakehub-missing0".to_string()),
        ..Config::default()
    };
    wol::wake_to(&config, dest).await.unwrap();

    let datagram = recv_one(&listener).await;
    assert_eq!(datagram.len(), 102);
}
