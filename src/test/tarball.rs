use std::io::Write;

use crate::compress::Compression;

pub struct TarFile {
    pub name: String,
    pub data: Vec<u8>,
}

pub fn file<N: Into<String>, D: AsRef<[u8]>>(name: N, data: D) -> TarFile {
    TarFile {
        name: name.into(),
        data: data.as_ref().to_vec(),
    }
}

/// Builds a tarball in memory.
pub fn tarball<I: IntoIterator<Item = TarFile>>(files: I, compression: Compression) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for file in files.into_iter() {
        let mut header = tar::Header::new_gnu();
        header.set_size(file.data.len() as u64);
        header.set_uid(1000);
        header.set_gid(1000);
        header.set_mode(0o644);
        header.set_mtime(1_600_000_000);
        header.set_entry_type(tar::EntryType::Regular);
        builder
            .append_data(&mut header, &file.name, &file.data[..])
            .unwrap();
    }
    compress(&builder.into_inner().unwrap(), compression)
}

pub fn compress<D: AsRef<[u8]>>(data: D, compression: Compression) -> Vec<u8> {
    let data = data.as_ref();
    match compression {
        Compression::None => data.to_vec(),
        Compression::Gzip => {
            let mut encoder =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        Compression::Bzip2 => {
            let mut encoder =
                bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
    }
}

pub fn gzip<D: AsRef<[u8]>>(data: D) -> Vec<u8> {
    compress(data, Compression::Gzip)
}

pub fn bzip2<D: AsRef<[u8]>>(data: D) -> Vec<u8> {
    compress(data, Compression::Bzip2)
}

/// File name suffix that the walker strips for this compression.
pub fn compression_suffix(compression: Compression) -> &'static str {
    match compression {
        Compression::None => "",
        Compression::Gzip => ".gz",
        Compression::Bzip2 => ".bz2",
    }
}

pub fn md5_hex<D: AsRef<[u8]>>(data: D) -> String {
    format!("{:x}", md5::compute(data))
}
