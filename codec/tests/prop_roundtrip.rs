use codec::{
    decode_packet, decode_tile, encode_packet, encode_tile, Block, BlockFrames, BlockId,
    BlockShape, ChangeType, CodecContext, FrameLookup, Liquid, LiquidType, Packet, PaintColor,
    Tile, TileFrame, TileSlice, TileSquare, WallId, Wiring, MAX_TILE_BYTES,
};
use cursor::{ByteReader, ByteWriter};
use proptest::prelude::*;

fn shape() -> impl Strategy<Value = BlockShape> {
    prop_oneof![
        Just(BlockShape::Normal),
        Just(BlockShape::Halved),
        Just(BlockShape::TopRight),
        Just(BlockShape::TopLeft),
        Just(BlockShape::BottomRight),
        Just(BlockShape::BottomLeft),
        Just(BlockShape::Slope5),
        Just(BlockShape::Slope6),
        Just(BlockShape::Slope7),
    ]
}

fn liquid_type() -> impl Strategy<Value = LiquidType> {
    prop_oneof![
        Just(LiquidType::Water),
        Just(LiquidType::Lava),
        Just(LiquidType::Honey),
        Just(LiquidType::Shimmer),
    ]
}

fn block() -> impl Strategy<Value = Block> {
    (any::<u16>(), shape(), any::<(i16, i16)>()).prop_map(|(id, shape, (fx, fy))| {
        let id = BlockId::new(id);
        let block = Block::new(id).with_shape(shape);
        if BlockFrames::builtin().has_frames(id) {
            block.with_frame(TileFrame::new(fx, fy))
        } else {
            block
        }
    })
}

fn tile() -> impl Strategy<Value = Tile> {
    (
        prop::option::of(block()),
        any::<u16>(),
        (any::<u8>(), liquid_type()),
        (0u8..=31, 0u8..=31),
        any::<[bool; 4]>(),
        any::<(bool, bool)>(),
    )
        .prop_map(
            |(block, wall, (amount, kind), (block_color, wall_color), wires, (actuator, actuated))| {
                Tile {
                    block,
                    wall: WallId::new(wall),
                    liquid: Liquid::new(amount, kind),
                    block_color: PaintColor::new(block_color),
                    wall_color: PaintColor::new(wall_color),
                    wiring: Wiring {
                        red: wires[0],
                        blue: wires[1],
                        green: wires[2],
                        yellow: wires[3],
                    },
                    has_actuator: actuator,
                    is_actuated: actuated,
                }
            },
        )
}

fn tile_square(max_size: u16) -> impl Strategy<Value = TileSquare> {
    (0..=max_size).prop_flat_map(|size| {
        let count = usize::from(size) * usize::from(size);
        (
            any::<(i16, i16)>(),
            prop::option::of(1u8..=3),
            prop::collection::vec(tile(), count),
        )
            .prop_map(move |((x, y), change, tiles)| {
                let mut slice = TileSlice::new(size).unwrap();
                let mut tiles = tiles.into_iter();
                for dx in 0..usize::from(size) {
                    for dy in 0..usize::from(size) {
                        slice[(dx, dy)] = tiles.next().unwrap();
                    }
                }
                TileSquare {
                    x,
                    y,
                    change_type: change.and_then(ChangeType::new),
                    tiles: slice,
                }
            })
    })
}

proptest! {
    #[test]
    fn prop_tile_roundtrip(tile in tile()) {
        let frames = BlockFrames::builtin();
        let mut buf = [0u8; MAX_TILE_BYTES];
        let mut writer = ByteWriter::new(&mut buf);
        let written = encode_tile(&tile, &mut writer, frames).unwrap();
        prop_assert_eq!(written, tile.encoded_len(frames));

        let mut reader = ByteReader::new(&buf[..written]);
        let decoded = decode_tile(&mut reader, frames).unwrap();
        prop_assert!(reader.is_empty());
        prop_assert_eq!(decoded, tile);
    }

    #[test]
    fn prop_tile_square_roundtrip(square in tile_square(12)) {
        let ctx = CodecContext::default();
        let packet = Packet::TileSquare(square);
        let mut out = vec![0u8; usize::from(u16::MAX)];
        let len = encode_packet(&packet, &ctx, &mut out).unwrap();
        prop_assert_eq!(usize::from(u16::from_le_bytes([out[0], out[1]])), len);

        let decoded = decode_packet(&out[..len], &ctx).unwrap();
        prop_assert_eq!(decoded, packet);
    }

    #[test]
    fn prop_unknown_kind_preserves_bytes(body in prop::collection::vec(any::<u8>(), 0..256)) {
        let ctx = CodecContext::default();
        let mut frame = Vec::with_capacity(body.len() + 3);
        frame.extend_from_slice(&u16::try_from(body.len() + 3).unwrap().to_le_bytes());
        frame.push(255);
        frame.extend_from_slice(&body);

        let packet = decode_packet(&frame, &ctx).unwrap();
        prop_assert!(packet.is_unknown());
        let mut out = vec![0u8; frame.len()];
        let len = encode_packet(&packet, &ctx, &mut out).unwrap();
        prop_assert_eq!(&out[..len], frame.as_slice());
    }

    #[test]
    fn prop_decode_never_panics(kind in any::<u8>(), body in prop::collection::vec(any::<u8>(), 0..128)) {
        let ctx = CodecContext::default();
        let mut frame = Vec::with_capacity(body.len() + 3);
        frame.extend_from_slice(&u16::try_from(body.len() + 3).unwrap().to_le_bytes());
        frame.push(kind);
        frame.extend_from_slice(&body);

        if let Ok(packet) = decode_packet(&frame, &ctx) {
            prop_assert_eq!(packet.kind().raw(), kind);
        }
    }
}
