//! The text printed by `-H`, rewritten in spirit from the original `zfind`'s
//! filter help (examples, field table, helper properties) rather than
//! copied verbatim.

pub const FILTER_HELP: &str = r#"zfind's filter uses a syntax very close to an SQL WHERE clause.

Examples:

  # files smaller than 10KB in the current directory
  zfind 'size<10k'

  # files in the given byte range, searched under /some/path
  zfind 'size between 1M and 1G' /some/path

  # files modified before 2010, inside a tar archive
  zfind 'date<"2010" and archive="tar"'

  # files named foo* that were modified today
  zfind 'name like "foo%" and date=today'

  # files whose name contains two dashes, matched with a regex
  zfind 'name rlike "(.*-){2}"'

  # files with a .jpg or .jpeg extension
  zfind 'ext in ("jpg","jpeg")'

  # directories named foo or bar
  zfind 'name in ("foo", "bar") and type="dir"'

  # all README.md files, long listing format
  zfind 'name="README.md"' -l

  # every match, as CSV (with or without the header row)
  zfind --csv
  zfind --csv-no-head

Fields:

  name        basename of the file
  path        path of the file, relative to the search root
  size        file size in bytes (uncompressed)
  date        modification date, YYYY-MM-DD
  time        modification time, HH:MM:SS
  ext         short extension (e.g. 'txt')
  ext2        long extension, up to two dot-separated suffixes (e.g. 'tar.gz')
  type        file|dir|link
  archive     tar|zip|7z|rar if the entry lives inside an archive
  container   path of the enclosing archive, if any

Helper fields (all YYYY-MM-DD):

  today       today's date
  mo          date of the most recent Monday
  tu          date of the most recent Tuesday
  we          date of the most recent Wednesday
  th          date of the most recent Thursday
  fr          date of the most recent Friday
  sa          date of the most recent Saturday
  su          date of the most recent Sunday

Operators: = != <> < > <= >= BETWEEN...AND IN(...) LIKE ILIKE RLIKE AND OR NOT
"#;
