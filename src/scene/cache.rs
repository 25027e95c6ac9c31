//! On-disk scene cache format: a magic-prefixed header followed by a flat
//! array of fixed-size triangle records. Deliberately simple — no
//! compression, no variable-length fields — so a round trip through
//! [`write_scene_cache`]/[`read_scene_cache`] is byte-for-byte identical.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};

use crate::error::PhysError;
use crate::geom::Triangle;
use crate::math::Vec3;

const MAGIC: &[u8; 4] = b"PCC1";
const VERSION: u32 = 1;

pub fn write_scene_cache(triangles: &[Triangle]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(12 + triangles.len() * 40);
    buf.write_all(MAGIC).expect("write to Vec never fails");
    buf.write_u32::<LittleEndian>(VERSION).unwrap();
    buf.write_u32::<LittleEndian>(triangles.len() as u32).unwrap();
    for tri in triangles {
        for v in [tri.v0, tri.v1, tri.v2] {
            buf.write_f32::<LittleEndian>(v.x).unwrap();
            buf.write_f32::<LittleEndian>(v.y).unwrap();
            buf.write_f32::<LittleEndian>(v.z).unwrap();
        }
        buf.write_u8(tri.double_sided as u8).unwrap();
        buf.write_u32::<LittleEndian>(tri.collision_mask).unwrap();
    }
    buf
}

pub fn read_scene_cache(bytes: &[u8]) -> Result<Vec<Triangle>, PhysError> {
    let mut cursor = Cursor::new(bytes);
    let mut magic = [0u8; 4];
    cursor
        .read_exact(&mut magic)
        .map_err(|_| PhysError::ModelLoadFailure { path: "<scene cache>".into() })?;
    if &magic != MAGIC {
        return Err(PhysError::ModelLoadFailure { path: "<scene cache: bad magic>".into() });
    }
    let version = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| PhysError::ModelLoadFailure { path: "<scene cache: truncated header>".into() })?;
    if version != VERSION {
        return Err(PhysError::ModelLoadFailure { path: format!("<scene cache: unsupported version {version}>") });
    }
    let count = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| PhysError::ModelLoadFailure { path: "<scene cache: truncated header>".into() })?;

    let mut out = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let read_vec = |c: &mut Cursor<&[u8]>| -> Result<Vec3, PhysError> {
            let x = c.read_f32::<LittleEndian>().map_err(trunc)?;
            let y = c.read_f32::<LittleEndian>().map_err(trunc)?;
            let z = c.read_f32::<LittleEndian>().map_err(trunc)?;
            Ok(Vec3::new(x, y, z))
        };
        let v0 = read_vec(&mut cursor)?;
        let v1 = read_vec(&mut cursor)?;
        let v2 = read_vec(&mut cursor)?;
        let double_sided = cursor.read_u8().map_err(trunc)? != 0;
        let collision_mask = cursor.read_u32::<LittleEndian>().map_err(trunc)?;
        out.push(Triangle {
            v0,
            v1,
            v2,
            double_sided,
            collision_mask,
        });
    }
    Ok(out)
}

fn trunc(_: std::io::Error) -> PhysError {
    PhysError::ModelLoadFailure { path: "<scene cache: truncated body>".into() }
}
