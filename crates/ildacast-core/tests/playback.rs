use std::net::UdpSocket;
use std::time::Duration;

use ildacast_core::{
    Command, Format, IldaWriter, Player, PlayerConfig, PointRecord, Repeat, Rgb, StopFlag,
    UdpTransport, decode, parse_datagram,
};

fn receiver() -> UdpSocket {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("bind receiver");
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .expect("read timeout");
    socket
}

fn recv_commands(socket: &UdpSocket) -> Vec<Command> {
    let mut buf = [0u8; 2048];
    let (len, _) = socket.recv_from(&mut buf).expect("datagram");
    assert!(len <= 1023, "datagram of {len} bytes");
    parse_datagram(&buf[..len]).expect("valid IWP datagram")
}

#[test]
fn streams_decoded_file_over_udp() {
    let mut writer = IldaWriter::new();
    writer
        .palette(&[Rgb::new(255, 0, 0)])
        .frame(
            Format::Indexed2d,
            &[
                PointRecord::indexed(-32768, 32767, 0),
                PointRecord::indexed(0, 0, 0).blanked(),
            ],
        )
        .frame(Format::TrueColor3d, &[PointRecord::rgb(32767, -32768, Rgb::new(0, 255, 1))]);
    let animation = decode(&writer.finish());

    let socket = receiver();
    let transport = UdpTransport::bind(socket.local_addr().unwrap()).unwrap();
    let config = PlayerConfig {
        scan_rate_hz: 20_000,
        repeat: Repeat::from_count(2),
        ..PlayerConfig::default()
    };
    let mut player = Player::new(transport, config).unwrap();
    let stats = player.play(&animation.frames, &StopFlag::new()).unwrap();
    assert_eq!(stats.packets_sent, 4);
    assert_eq!(stats.loops_completed, 2);

    assert_eq!(recv_commands(&socket), vec![Command::Period { micros: 50 }]);
    for _ in 0..2 {
        let first = recv_commands(&socket);
        assert_eq!(first.len(), 2);
        let Command::PointRgb16(red) = first[0] else {
            panic!("expected 16-bit point");
        };
        assert_eq!((red.x, red.y), (0, 1));
        assert_eq!((red.r, red.g, red.b), (65535, 0, 0));
        let Command::PointRgb16(blank) = first[1] else {
            panic!("expected 16-bit point");
        };
        assert_eq!((blank.x, blank.y), (32768, 32768));
        assert_eq!((blank.r, blank.g, blank.b), (0, 0, 0));

        let second = recv_commands(&socket);
        let Command::PointRgb16(green) = second[0] else {
            panic!("expected 16-bit point");
        };
        assert_eq!((green.x, green.y), (65535, 0));
        assert_eq!((green.r, green.g, green.b), (0, 65535, 257));
    }
}

#[test]
fn turn_off_follows_interrupted_playback() {
    let mut writer = IldaWriter::new();
    writer.frame(Format::TrueColor2d, &[PointRecord::rgb(0, 0, Rgb::WHITE); 10]);
    let animation = decode(&writer.finish());

    let socket = receiver();
    let transport = UdpTransport::bind(socket.local_addr().unwrap()).unwrap();
    let config = PlayerConfig {
        repeat: Repeat::Forever,
        turn_off_on_exit: true,
        ..PlayerConfig::default()
    };
    let mut player = Player::new(transport, config).unwrap();
    let stop = StopFlag::new();
    stop.request_stop();
    let stats = player.play(&animation.frames, &stop).unwrap();
    assert!(stats.interrupted);

    assert_eq!(recv_commands(&socket), vec![Command::Period { micros: 1000 }]);
    assert_eq!(recv_commands(&socket), vec![Command::TurnOff]);
}
