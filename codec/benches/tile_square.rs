//! Tile square encode/decode throughput.
//!
//! Run with: cargo bench --package terrawire-codec --bench tile_square

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use codec::{
    decode_packet, encode_packet, Block, BlockId, BlockShape, CodecContext, Liquid, LiquidType,
    Packet, PaintColor, Tile, TileFrame, TileSlice, TileSquare, WallId, Wiring,
};

fn mixed_square(size: u16) -> TileSquare {
    let mut tiles = TileSlice::new(size).unwrap();
    let size = usize::from(size);
    for dx in 0..size {
        for dy in 0..size {
            tiles[(dx, dy)] = match (dx + dy) % 4 {
                0 => Tile::default(),
                1 => Tile {
                    block: Some(Block::new(BlockId::new(1)).with_shape(BlockShape::TopLeft)),
                    wall: WallId::new(4),
                    ..Tile::default()
                },
                2 => Tile {
                    block: Some(Block::new(BlockId::new(21)).with_frame(TileFrame::new(18, 0))),
                    block_color: PaintColor::new(3),
                    wiring: Wiring {
                        red: true,
                        ..Wiring::default()
                    },
                    ..Tile::default()
                },
                _ => Tile {
                    liquid: Liquid::new(255, LiquidType::Water),
                    ..Tile::default()
                },
            };
        }
    }
    TileSquare {
        x: 100,
        y: 200,
        change_type: None,
        tiles,
    }
}

fn benchmark_tile_square(c: &mut Criterion) {
    let ctx = CodecContext::default();
    let mut group = c.benchmark_group("tile_square");

    for size in [4u16, 16, 64] {
        let packet = Packet::TileSquare(mixed_square(size));
        let mut buf = vec![0u8; usize::from(u16::MAX)];
        let len = encode_packet(&packet, &ctx, &mut buf).unwrap();
        let frame = buf[..len].to_vec();

        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
        group.bench_with_input(BenchmarkId::new("encode", size), &packet, |b, packet| {
            b.iter(|| black_box(encode_packet(black_box(packet), &ctx, &mut buf).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &frame, |b, frame| {
            b.iter(|| black_box(decode_packet(black_box(frame), &ctx).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_tile_square);
criterion_main!(benches);
